//! Multipart submission form

use axum::extract::Multipart;

use crate::catalog::ColorTable;
use crate::error::{AppError, Result};

/// Color used when the client sends none
pub const DEFAULT_COLOR: &str = "Black";

/// Fields of a headshot submission
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub image: Vec<u8>,
    pub file_name: Option<String>,
    pub clothing: Vec<String>,
    pub backgrounds: Vec<String>,
    pub gender: String,
    pub color: Option<String>,
    /// Accepted for compatibility; not used in prompts
    pub profession: Option<String>,
    /// Accepted for compatibility; not used in prompts
    pub age: Option<u32>,
}

/// Parse a selection field: a JSON list, a JSON string, or a bare value
pub fn parse_selection(raw: &str) -> Result<Vec<String>> {
    let raw = raw.trim();
    let values = if raw.starts_with('[') {
        serde_json::from_str::<Vec<String>>(raw)
            .map_err(|e| AppError::InvalidSelection(format!("Malformed selection list: {}", e)))?
    } else if raw.starts_with('"') {
        vec![serde_json::from_str::<String>(raw)
            .map_err(|e| AppError::InvalidSelection(format!("Malformed selection: {}", e)))?]
    } else {
        vec![raw.to_string()]
    };

    Ok(values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect())
}

fn read_error(e: impl std::fmt::Display) -> AppError {
    AppError::InvalidRequest(format!("Multipart error: {}", e))
}

impl SubmissionForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            let name = field.name().map(|n| n.to_string());
            match name.as_deref() {
                Some("image") => {
                    form.file_name = field.file_name().map(|n| n.to_string());
                    form.image = field.bytes().await.map_err(read_error)?.to_vec();
                }
                Some("clothing") => form.clothing = parse_selection(&field.text().await.map_err(read_error)?)?,
                Some("background") => {
                    form.backgrounds = parse_selection(&field.text().await.map_err(read_error)?)?
                }
                Some("gender") => form.gender = field.text().await.map_err(read_error)?.trim().to_string(),
                Some("color") => {
                    let color = field.text().await.map_err(read_error)?.trim().to_string();
                    form.color = Some(color).filter(|c| !c.is_empty());
                }
                Some("profession") => form.profession = Some(field.text().await.map_err(read_error)?),
                Some("age") => {
                    let age = field.text().await.map_err(read_error)?;
                    let age = age.trim();
                    if !age.is_empty() {
                        form.age = Some(age.parse().map_err(|_| {
                            AppError::InvalidRequest(format!("Invalid age '{}'", age))
                        })?);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Check required fields and resolve the color against the allow-list
    pub fn validate(&mut self, colors: &ColorTable) -> Result<()> {
        if self.image.is_empty() {
            return Err(AppError::InvalidRequest("An image file is required".to_string()));
        }
        if self.clothing.is_empty() || self.backgrounds.is_empty() {
            return Err(AppError::InvalidSelection(
                "clothing or background selection is empty".to_string(),
            ));
        }
        if self.gender.is_empty() {
            return Err(AppError::InvalidRequest("gender is required".to_string()));
        }

        let color = self.color.get_or_insert_with(|| DEFAULT_COLOR.to_string());
        if !colors.contains(color) {
            return Err(AppError::InvalidSelection(format!("Color '{}' is not available", color)));
        }

        Ok(())
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}
