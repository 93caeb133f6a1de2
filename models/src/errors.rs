// models/src/errors.rs

use std::io;

use chrono::NaiveDate;
pub use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read diagnosis catalog: {0}")]
    Io(#[from] io::Error),
    #[error("Diagnosis catalog is not valid JSON: {0}")]
    CatalogFormat(#[from] serde_json::Error),
    #[error("Diagnosis code {0} is listed more than once")]
    DuplicateDiagnosisCode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A validation error raised while turning an untyped payload into a record.
///
/// The messages are meant to be shown to whoever sent the payload, so they
/// name the offending field and echo the value that was found.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The payload (or a nested field) was not a JSON object.
    #[error("Invalid {0}: expected a JSON object")]
    NotAnObject(&'static str),
    /// A required text field is absent, empty, or not a string.
    #[error("Incorrect or missing {field}: {found}")]
    IncorrectOrMissing { field: &'static str, found: String },
    /// A date field is present but is not a `YYYY-MM-DD` calendar date.
    #[error("Incorrect {field}: {found} is not a YYYY-MM-DD date")]
    InvalidDateFormat { field: &'static str, found: String },
    #[error("Incorrect or missing gender: {0}")]
    InvalidGender(String),
    #[error("Invalid type provided {0}")]
    InvalidEntryType(String),
    #[error("Invalid health check provided: {0}")]
    InvalidHealthCheckRating(String),
    #[error("Invalid diagnosis codes provided {0}")]
    InvalidDiagnosisCodes(String),
    /// A diagnosis code that the configured catalog does not know.
    #[error("Unknown diagnosis code {0}")]
    UnknownDiagnosisCode(String),
    #[error("Invalid discharge provided {0}")]
    InvalidDischarge(String),
    #[error("Invalid sick leave provided {0}")]
    InvalidSickLeave(String),
    #[error("Sick leave ends on {end} before it starts on {start}")]
    SickLeaveEndsBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Invalid entries provided: {0}")]
    InvalidEntries(String),
    /// An identifier has an invalid length.
    #[error("identifier has invalid length")]
    InvalidIdentifierLength,
}

/// A type alias for a `Result` that returns a `ModelError` on failure.
pub type ModelResult<T> = Result<T, ModelError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
