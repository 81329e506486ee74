use crate::errors::ApiError;
use axum::extract::Multipart;
use bytes::Bytes;
use std::collections::HashMap;

/// Form part name carrying file uploads
pub(super) const FILES_FIELD: &str = "files";

pub(super) struct UploadedFile {
    /// Client-supplied name; `None` when missing or blank
    pub file_name: Option<String>,
    pub data: Bytes,
}

/// A fully buffered multipart form
#[derive(Default)]
pub(super) struct UploadForm {
    pub files: Vec<UploadedFile>,
    fields: HashMap<String, Vec<String>>,
}

impl UploadForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            // Text parts under `files` are ignored, only real file parts count
            match field.file_name().map(str::to_string) {
                Some(file_name) if name == FILES_FIELD => {
                    let data = field.bytes().await?;
                    form.files.push(UploadedFile {
                        file_name: Some(file_name).filter(|n| !n.trim().is_empty()),
                        data,
                    });
                }
                Some(_) => {
                    tracing::debug!("Skipping file part '{}'", name);
                }
                None if name == FILES_FIELD => {}
                None => {
                    let value = field.text().await?;
                    form.fields.entry(name).or_default().push(value);
                }
            }
        }

        Ok(form)
    }

    /// Value of the first of `names` that is present and not blank
    pub fn first_field(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.field(name))
    }

    /// First value of a text field, trimmed; blank counts as missing
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn values(&self, name: &str) -> Vec<String> {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}
