//! Body normalisation applied before validation.
//!
//! Request DTOs trim their string fields, fold case where a field demands it
//! and fill defaults. Validation then runs against the normalised value, so a
//! required field holding only whitespace is reported as missing.

pub trait Normalize {
    fn normalize(&mut self);
}

pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn trim_opt(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
    }
}

pub fn upper_opt(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
        *inner = inner.to_uppercase();
    }
}

pub fn lower_opt(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
        *inner = inner.to_lowercase();
    }
}
