//! Menu headings and dishes

use super::catalog::optional_text;
use super::validation::{required_text, ValidationError};

#[derive(Debug, Clone)]
pub struct NewMenuHeading {
    pub heading: String,
    pub dish_names: Vec<String>,
}

impl NewMenuHeading {
    /// `dish_names` pair by position with the uploaded dish images,
    /// so `dish_image_count` must match.
    pub fn new(
        heading: &str,
        dish_names: &[String],
        dish_image_count: usize,
    ) -> Result<Self, ValidationError> {
        if dish_names.len() != dish_image_count {
            return Err(ValidationError::Mismatched {
                left: "dish_names",
                right: "dish_images",
            });
        }

        let dish_names = dish_names
            .iter()
            .map(|name| required_text("dish_names", name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            heading: required_text("heading", heading)?,
            dish_names,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuHeadingPatch {
    pub heading: Option<String>,
    pub heading_image: Option<String>,
}

impl MenuHeadingPatch {
    pub fn new(heading: Option<&str>) -> Self {
        Self {
            heading: optional_text(heading),
            heading_image: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.heading_image.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewDish {
    pub name: String,
}

impl NewDish {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_names_pair_with_images() {
        let names = vec!["Soup".to_string(), "Salad".to_string()];
        assert!(NewMenuHeading::new("Starters", &names, 2).is_ok());
        assert_eq!(
            NewMenuHeading::new("Starters", &names, 1).unwrap_err(),
            ValidationError::Mismatched {
                left: "dish_names",
                right: "dish_images"
            }
        );
    }

    #[test]
    fn heading_without_dishes_is_allowed() {
        let menu = NewMenuHeading::new("Desserts", &[], 0).unwrap();
        assert!(menu.dish_names.is_empty());
    }

    #[test]
    fn blank_dish_name_rejected() {
        let names = vec!["Soup".to_string(), " ".to_string()];
        assert!(NewMenuHeading::new("Starters", &names, 2).is_err());
    }
}
