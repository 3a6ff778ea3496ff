//! `multipart/form-data` parsing for the pet and gallery endpoints.
//!
//! Forms are read completely before anything is validated or stored, so a
//! bad field never leaves an orphaned upload behind.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use pawhaven_core::error::CoreError;
use pawhaven_core::pet::PetInput;

use crate::error::{AppError, AppResult};

/// An uploaded file as received: raw bytes, not yet sniffed or stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
}

/// Fields of a pet create/update form.
#[derive(Debug, Default)]
pub struct PetForm {
    pub input: PetInput,
    pub photo: Option<Upload>,
}

/// Fields of a gallery create/update form.
#[derive(Debug, Default)]
pub struct GalleryForm {
    pub caption: Option<String>,
    pub image: Option<Upload>,
}

impl PetForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = PetForm::default();

        while let Some(field) = next_field(&mut multipart).await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "name" => form.input.name = Some(text(field).await?),
                "type" => form.input.pet_type = Some(text(field).await?),
                "breed" => form.input.breed = Some(text(field).await?),
                "age" => form.input.age = Some(parse_age(&text(field).await?)?),
                "gender" => form.input.gender = Some(text(field).await?),
                "purpose" => form.input.purpose = Some(text(field).await?),
                "description" => form.input.description = Some(text(field).await?),
                "available" => form.input.available = Some(parse_bool(&text(field).await?)?),
                "photo" => form.photo = file(field).await?,
                // `owner`, `id`, `created_at` and anything else are ignored.
                _ => {}
            }
        }

        Ok(form)
    }
}

impl GalleryForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = GalleryForm::default();

        while let Some(field) = next_field(&mut multipart).await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "caption" => form.caption = Some(text(field).await?),
                "image" => form.image = file(field).await?,
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn next_field(multipart: &mut Multipart) -> AppResult<Option<Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// A file part with no bytes (an empty file input) counts as "not sent".
async fn file(field: Field<'_>) -> AppResult<Option<Upload>> {
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if data.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload {
        bytes: data.to_vec(),
    }))
}

fn parse_age(raw: &str) -> Result<i32, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::validation("age", "A valid integer is required"))
}

fn parse_bool(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(CoreError::validation("available", "Must be a valid boolean")),
    }
}
