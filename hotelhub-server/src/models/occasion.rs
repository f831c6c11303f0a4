//! Occasion inputs

use super::catalog::optional_text;
use super::validation::{price, required_text, ValidationError};

/// Pricing tiers of an occasion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccasionPricing {
    pub price: f64,
    pub standard_price: f64,
    pub outstandard_price: f64,
}

impl OccasionPricing {
    pub fn new(
        amount: f64,
        standard_price: f64,
        outstandard_price: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            price: price("price", amount)?,
            standard_price: price("standard_price", standard_price)?,
            outstandard_price: price("outstandard_price", outstandard_price)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewOccasion {
    pub name: String,
    pub heading: String,
    pub description: String,
    pub pricing: OccasionPricing,
    pub tags: Vec<String>,
}

impl NewOccasion {
    pub fn new(
        name: &str,
        heading: &str,
        description: &str,
        pricing: OccasionPricing,
        tags: &[String],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            heading: required_text("heading", heading)?,
            description: required_text("description", description)?,
            pricing,
            tags: normalize_tags(tags),
        })
    }
}

/// Partial occasion update. Supplied `tags` / `images` replace the stored lists.
#[derive(Debug, Clone, Default)]
pub struct OccasionPatch {
    pub name: Option<String>,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub standard_price: Option<f64>,
    pub outstandard_price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

impl OccasionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.heading.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.standard_price.is_none()
            && self.outstandard_price.is_none()
            && self.tags.is_none()
            && self.images.is_none()
    }
}

/// Builder-style setters that normalize raw form input
impl OccasionPatch {
    pub fn with_text(
        mut self,
        name: Option<&str>,
        heading: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        self.name = optional_text(name);
        self.heading = optional_text(heading);
        self.description = optional_text(description);
        self
    }

    pub fn with_prices(
        mut self,
        amount: Option<f64>,
        standard_price: Option<f64>,
        outstandard_price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        self.price = amount.map(|p| price("price", p)).transpose()?;
        self.standard_price = standard_price
            .map(|p| price("standard_price", p))
            .transpose()?;
        self.outstandard_price = outstandard_price
            .map(|p| price("outstandard_price", p))
            .transpose()?;
        Ok(self)
    }

    /// An empty slice leaves the stored tags untouched.
    pub fn with_tags(mut self, tags: &[String]) -> Self {
        let tags = normalize_tags(tags);
        self.tags = (!tags.is_empty()).then_some(tags);
        self
    }
}

/// Trim tags, drop blanks and repeated entries while keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_owned());
        }
    }
    out
}
