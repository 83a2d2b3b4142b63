//! Multipart form decoding for the AI-facing endpoints

use crate::ai::ImagePart;
use crate::error::ApiError;
use axum::extract::Multipart;
use std::collections::HashMap;

/// Text fields and the first uploaded file of a form
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    image: Option<ImagePart>,
}

impl FormData {
    /// Owned text value, treating blank values as absent
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name).filter(|v| !v.trim().is_empty())
    }

    pub fn take_image(&mut self) -> Option<ImagePart> {
        self.image.take()
    }
}

/// Read every part of a multipart body
///
/// Parts with a file name are treated as the uploaded image; browsers send
/// an empty file part when nothing was chosen, which is ignored.
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, ApiError> {
    let mut form = FormData::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            let mime_type = field
                .content_type()
                .unwrap_or("image/jpeg")
                .to_string();
            let data = field.bytes().await.map_err(bad_form)?;
            if !data.is_empty() && form.image.is_none() {
                form.image = Some(ImagePart {
                    mime_type,
                    data: data.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(bad_form)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

fn bad_form(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid form data: {}", err.body_text()))
}
