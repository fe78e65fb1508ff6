//! The module contains the errors the engine can throw.
//!
//! Two families live here:
//!
//! - [`EngineError`] for failures of the engine itself, e.g. a broken
//!   reference table at startup or a field name nobody knows.
//! - [`Violation`] for a field value that does not pass its rule. A violation
//!   is an expected outcome, its [`Display`] is the message shown next to the
//!   field.
//!
//!  [`Display`]: std::fmt::Display
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid state table: {0}")]
    InvalidStateTable(String),
    #[error("\"{0}\" is not a form field")]
    UnknownField(String),
    #[error("\"{0}\" state not found!")]
    UnknownState(String),
}

/// Reason a single field value was rejected.
///
/// Rules short-circuit, so a field never carries more than one violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Required")]
    Required,
    #[error("Too short")]
    TooShort,
    #[error("Too long")]
    TooLong,
    #[error("Contains invalid characters")]
    InvalidCharacters,
    #[error("Must contain only letters")]
    NotLetters,
    #[error("Must contain only digits")]
    NotDigits,
    #[error("Must be exactly 10 digits")]
    PhoneLength,
    #[error("Should start with 6 - 9")]
    PhonePrefix,
    #[error("Must be exactly 15 characters")]
    GstinLength,
    #[error("State code must be numeric")]
    GstinStateCode,
    #[error("Entity code must be a digit or letter")]
    GstinEntityCode,
    #[error("GSTIN has an invalid format")]
    GstinFormat,
    #[error("Checksum must be a digit or letter")]
    GstinChecksum,
    #[error("PAN must be exactly 10 characters")]
    PanLength,
    #[error("First 5 characters must be letters")]
    PanLetters,
    #[error("Invalid PAN holder type")]
    PanHolderType,
    #[error("Characters 6 - 9 must be digits")]
    PanDigits,
    #[error("Numeric portion must be between 0001 and 9999")]
    PanSerial,
    #[error("Last character must be a letter")]
    PanCheckLetter,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Unknown state")]
    UnknownState,
    #[error("Must be within [{min} - {max}]")]
    PostalCodeRange { min: u32, max: u32 },
    #[error("Must be 2, 4, 6 or 8 digits")]
    HsnLength,
    #[error("Must be greater than 0")]
    NotPositive,
    #[error("Must be between 0 and {max}")]
    PercentRange { max: u8 },
}
