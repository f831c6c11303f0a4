//! Admin catalogue inputs: services, team members, events
//!
//! `New*` types carry the text fields of a creation request; the image
//! path is attached by the handler once the upload has been stored.
//! `*Patch` types are partial updates where every field is optional.

use super::validation::{price, required_text, ValidationError};

/// Normalize an optional text field: blank means "not supplied".
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Reject a patch that would change nothing.
pub fn ensure_changes(has_fields: bool, has_upload: bool) -> Result<(), ValidationError> {
    if has_fields || has_upload {
        Ok(())
    } else {
        Err(ValidationError::NoFieldsToUpdate)
    }
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: String,
}

impl NewService {
    pub fn new(name: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            description: required_text("description", description)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

impl ServicePatch {
    pub fn new(name: Option<&str>, description: Option<&str>) -> Self {
        Self {
            name: optional_text(name),
            description: optional_text(description),
            image_path: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image_path.is_none()
    }
}

// ============================================================================
// Team members
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub designation: String,
    pub description: String,
}

impl NewTeamMember {
    pub fn new(name: &str, designation: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            designation: required_text("designation", designation)?,
            description: required_text("description", description)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

impl TeamMemberPatch {
    pub fn new(
        name: Option<&str>,
        designation: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        Self {
            name: optional_text(name),
            designation: optional_text(designation),
            description: optional_text(description),
            image_path: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.description.is_none()
            && self.image_path.is_none()
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl NewEvent {
    pub fn new(name: &str, description: &str, amount: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            description: required_text("description", description)?,
            price: price("price", amount)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub pic_path: Option<String>,
}

impl EventPatch {
    pub fn new(
        name: Option<&str>,
        description: Option<&str>,
        amount: Option<f64>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: optional_text(name),
            description: optional_text(description),
            price: amount.map(|p| price("price", p)).transpose()?,
            pic_path: None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.pic_path.is_none()
    }
}
