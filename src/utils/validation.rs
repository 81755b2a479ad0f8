use crate::utils::error::{LibraryError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ISBN_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:\d[\d-]{8,15}[\dXx])$").ok());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Identifiers are free text, but they are used as map keys and echoed in
/// notifications, so surrounding whitespace and control characters are
/// rejected.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.trim() != value {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Identifier has leading or trailing whitespace".to_string(),
        });
    }

    if value.chars().any(char::is_control) {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.escape_debug().to_string(),
            reason: "Identifier contains control characters".to_string(),
        });
    }

    Ok(())
}

/// Whether `isbn` has the shape of an ISBN-10 or ISBN-13 (hyphens allowed).
/// Catalog keys are not required to be real ISBNs; this only drives a warning.
pub fn is_standard_isbn(isbn: &str) -> bool {
    let Some(shape) = ISBN_SHAPE.as_ref() else {
        return false;
    };
    if !shape.is_match(isbn) {
        return false;
    }

    let digits = isbn.chars().filter(|c| *c != '-').count();
    digits == 10 || digits == 13
}

pub fn validate_unique_keys<'a, I>(field_name: &str, keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(LibraryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: key.to_string(),
                reason: "Duplicate key".to_string(),
            });
        }
    }
    Ok(())
}
