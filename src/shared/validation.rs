use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for issue / report identifiers
    /// Alphanumeric segments joined by single hyphens or underscores
    /// - Valid: "ISS-1001", "R001", "ward_12-a"
    /// - Invalid: "-R001", "R001-", "R 001", "R--1", ""
    pub static ref RECORD_ID_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)*$").unwrap();
}

/// Rejects values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
