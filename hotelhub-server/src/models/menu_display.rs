//! Occasion menu display: packages containing priced subpackages

use serde::Deserialize;

use super::validation::{price, required_text, ValidationError};

/// Request body for creating an occasion's menu display
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDisplayRequest {
    pub occasion_id: i32,
    pub title: String,
    pub packages: Vec<PackageRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    #[serde(default)]
    pub subpackages: Vec<SubpackageRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubpackageRequest {
    pub name: String,
    pub price: f64,
}

/// Validated menu display
#[derive(Debug, Clone)]
pub struct NewMenuDisplay {
    pub occasion_id: i32,
    pub title: String,
    pub packages: Vec<NewPackage>,
}

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub name: String,
    pub subpackages: Vec<NewSubpackage>,
}

#[derive(Debug, Clone)]
pub struct NewSubpackage {
    pub name: String,
    pub price: f64,
}

impl MenuDisplayRequest {
    pub fn validate(self) -> Result<NewMenuDisplay, ValidationError> {
        if self.packages.is_empty() {
            return Err(ValidationError::Empty { field: "packages" });
        }

        let packages = self
            .packages
            .into_iter()
            .map(|pkg| -> Result<NewPackage, ValidationError> {
                let subpackages = pkg
                    .subpackages
                    .into_iter()
                    .map(|sub| -> Result<NewSubpackage, ValidationError> {
                        Ok(NewSubpackage {
                            name: required_text("subpackage name", &sub.name)?,
                            price: price("subpackage price", sub.price)?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(NewPackage {
                    name: required_text("package name", &pkg.name)?,
                    subpackages,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewMenuDisplay {
            occasion_id: self.occasion_id,
            title: required_text("title", &self.title)?,
            packages,
        })
    }
}
