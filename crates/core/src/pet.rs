//! Pet field constraints and write-time validation.
//!
//! Column sizes mirror the `pets` table; see `20260101000002_create_pets.sql`.

use crate::error::CoreError;
use crate::validation::{optional_text, require_text};

pub const NAME_MAX_LEN: usize = 100;
pub const TYPE_MAX_LEN: usize = 50;
pub const BREED_MAX_LEN: usize = 100;
pub const GENDER_MAX_LEN: usize = 20;
pub const PURPOSE_MAX_LEN: usize = 20;

/// How much of the record a write supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// New record: every required field must be present.
    Create,
    /// Full replacement (PUT): required fields must be present.
    Replace,
    /// Partial update (PATCH): only supplied fields are checked.
    Partial,
}

impl WriteMode {
    fn requires_all(self) -> bool {
        !matches!(self, WriteMode::Partial)
    }
}

/// Client-supplied pet fields. The owner is never part of this input; it is
/// always stamped from the authenticated requester.
#[derive(Debug, Clone, Default)]
pub struct PetInput {
    pub name: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Validate pet fields for the given write mode.
///
/// Returns the first offending field. Nothing is persisted by the caller
/// unless this returns `Ok`.
pub fn validate_pet_input(input: &PetInput, mode: WriteMode) -> Result<(), CoreError> {
    match (&input.name, mode.requires_all()) {
        (Some(name), _) => require_text("name", name, NAME_MAX_LEN)?,
        (None, true) => return Err(required("name")),
        (None, false) => {}
    }

    match (&input.pet_type, mode.requires_all()) {
        (Some(t), _) => require_text("type", t, TYPE_MAX_LEN)?,
        (None, true) => return Err(required("type")),
        (None, false) => {}
    }

    match (input.age, mode.requires_all()) {
        (Some(age), _) => validate_age(age)?,
        (None, true) => return Err(required("age")),
        (None, false) => {}
    }

    optional_text("breed", input.breed.as_deref(), BREED_MAX_LEN)?;
    optional_text("gender", input.gender.as_deref(), GENDER_MAX_LEN)?;
    optional_text("purpose", input.purpose.as_deref(), PURPOSE_MAX_LEN)?;
    Ok(())
}

/// Age is a non-negative whole number of years.
pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if age < 0 {
        return Err(CoreError::validation(
            "age",
            "Ensure this value is greater than or equal to 0",
        ));
    }
    Ok(())
}

fn required(field: &'static str) -> CoreError {
    CoreError::validation(field, "This field is required")
}
