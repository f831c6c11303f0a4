//! Custom Axum extractors

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Request};
use axum::Json;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;
use crate::storage::Upload;

/// Extract a numeric id from the path
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = id.parse::<i32>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}

/// JSON body whose rejections come back as JSON validation errors
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// A fully buffered `multipart/form-data` body.
///
/// Parts carrying a filename are uploads, everything else is text.
/// File parts with an empty filename are what browsers send for an
/// untouched file input, so they are dropped.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<Upload>>,
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;

        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| malformed(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let bytes = field.bytes().await.map_err(|e| malformed(e.body_text()))?;
                    if filename.is_empty() {
                        continue;
                    }
                    form.push_file(name, Upload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                None => {
                    let text = field.text().await.map_err(|e| malformed(e.body_text()))?;
                    form.push_text(name, text);
                }
            }
        }

        Ok(form)
    }
}

impl MultipartForm {
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.entry(name.into()).or_default().push(value.into());
    }

    pub fn push_file(&mut self, name: impl Into<String>, upload: Upload) {
        self.files.entry(name.into()).or_default().push(upload);
    }

    /// First value of a text field. Blank values count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn require_text(&self, name: &'static str) -> Result<&str, ValidationError> {
        self.text(name).ok_or(ValidationError::Empty { field: name })
    }

    /// Every value sent under a repeated field name, in order.
    pub fn texts(&self, name: &str) -> &[String] {
        self.texts.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn optional_f64(&self, name: &'static str) -> Result<Option<f64>, ValidationError> {
        self.text(name)
            .map(|raw| {
                raw.trim().parse::<f64>().map_err(|_| ValidationError::InvalidFormat {
                    field: name,
                    reason: "must be a number",
                })
            })
            .transpose()
    }

    pub fn require_f64(&self, name: &'static str) -> Result<f64, ValidationError> {
        self.optional_f64(name)?
            .ok_or(ValidationError::Empty { field: name })
    }

    pub fn file(&self, name: &str) -> Option<&Upload> {
        self.files.get(name).and_then(|files| files.first())
    }

    pub fn require_file(&self, name: &'static str) -> Result<&Upload, ValidationError> {
        self.file(name).ok_or(ValidationError::Empty { field: name })
    }

    pub fn files(&self, name: &str) -> &[Upload] {
        self.files.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

fn malformed(detail: String) -> ApiError {
    ApiError::Validation(ValidationError::Malformed(detail))
}
