//! Field rules shared by the DTOs that `validator` cannot express with its
//! built-in checks.

use chrono::{DateTime, Datelike, Utc};
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError};

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
pub const LEVEL_NAMES: [&str; 3] = ["Senior 4", "Senior 5", "Senior 6"];
pub const MIN_ESTABLISHED_YEAR: i64 = 1900;

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Email format, with the empty string allowed.
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.to_owned().validate_email() {
        Ok(())
    } else {
        Err(error("email", "\"email\" must be a valid email".into()))
    }
}

pub fn gender(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || GENDERS.contains(&value) {
        Ok(())
    } else {
        Err(error(
            "gender",
            format!("\"gender\" must be one of [{}]", GENDERS.join(", ")),
        ))
    }
}

pub fn level_name(value: &str) -> Result<(), ValidationError> {
    if LEVEL_NAMES.contains(&value) {
        Ok(())
    } else {
        Err(error(
            "name",
            format!("\"name\" must be one of [{}]", LEVEL_NAMES.join(", ")),
        ))
    }
}

pub fn not_in_future(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value <= Utc::now() {
        Ok(())
    } else {
        Err(error(
            "dateOfBirth",
            "\"dateOfBirth\" must be less than or equal to \"now\"".into(),
        ))
    }
}

/// 1900 up to and including the current year.
pub fn established_year(value: i64) -> Result<(), ValidationError> {
    let current = i64::from(Utc::now().year());
    if (MIN_ESTABLISHED_YEAR..=current).contains(&value) {
        Ok(())
    } else {
        Err(error(
            "establishedYear",
            format!(
                "\"establishedYear\" must be between {} and {}",
                MIN_ESTABLISHED_YEAR, current
            ),
        ))
    }
}
