//! # Error Types — Validation Error Hierarchy
//!
//! Defines the errors raised while building stowage values from raw input.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations and carry the offending value so front ends can report
//! exactly what was rejected.
//!
//! ## Design
//!
//! - [`InvalidCode`] covers every way an identifier string can be malformed,
//!   including a check digit that does not match the computed one.
//! - [`InvalidContainer`] covers out-of-range container attributes.
//! - [`StowageError`] aggregates both for callers that construct containers
//!   straight from user input.

use thiserror::Error;

/// A container identifier failed shape or checksum validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCode {
    /// No characters were supplied.
    #[error("container code must not be empty")]
    Empty,

    /// The input does not have the required number of characters.
    #[error("container code \"{code}\" has {len} characters (expected {expected})")]
    WrongLength {
        /// The rejected input.
        code: String,
        /// Number of characters found.
        len: usize,
        /// Number of characters required.
        expected: usize,
    },

    /// An owner or category position holds something other than `A`-`Z`.
    #[error("container code \"{code}\": character {position} must be an uppercase letter, found {found:?}")]
    ExpectedLetter {
        /// The rejected input.
        code: String,
        /// One-based position of the offending character.
        position: usize,
        /// The character found there.
        found: char,
    },

    /// A serial or check-digit position holds something other than `0`-`9`.
    #[error("container code \"{code}\": character {position} must be a digit, found {found:?}")]
    ExpectedDigit {
        /// The rejected input.
        code: String,
        /// One-based position of the offending character.
        position: usize,
        /// The character found there.
        found: char,
    },

    /// The declared check digit disagrees with the computed one.
    #[error("container code \"{code}\": check digit is {found}, expected {expected}")]
    CheckDigitMismatch {
        /// The rejected input.
        code: String,
        /// Check digit computed from the first ten characters.
        expected: u8,
        /// Check digit declared in the eleventh character.
        found: u8,
    },
}

/// A container attribute lies outside its permitted range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidContainer {
    /// Gross weight is not within the inclusive tonnage bounds.
    #[error("gross weight {weight} t is not between {min} and {max} tonnes")]
    GrossWeightOutOfRange {
        /// The rejected weight.
        weight: i32,
        /// Smallest permitted weight.
        min: i32,
        /// Largest permitted weight.
        max: i32,
    },

    /// Dangerous-goods category is not a recognised hazard class.
    #[error("dangerous goods category {category} is not between {min} and {max}")]
    CategoryOutOfRange {
        /// The rejected category.
        category: i32,
        /// Smallest permitted category.
        min: i32,
        /// Largest permitted category.
        max: i32,
    },

    /// A container record omits the attribute its variant requires.
    #[error("{kind} container record is missing its {attribute}")]
    MissingAttribute {
        /// Variant named by the record.
        kind: String,
        /// Name of the missing field.
        attribute: &'static str,
    },

    /// A container record carries an attribute its variant does not have.
    #[error("{kind} container record has no {attribute}")]
    UnexpectedAttribute {
        /// Variant named by the record.
        kind: String,
        /// Name of the extra field.
        attribute: &'static str,
    },

    /// A variant name does not match any container kind.
    #[error("unknown container kind: \"{0}\" (expected general, dangerous_goods or refrigerated)")]
    UnknownKind(String),
}

/// Top-level error for building stowage values from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StowageError {
    /// The identifier was rejected.
    #[error("invalid code: {0}")]
    Code(#[from] InvalidCode),

    /// The container attributes were rejected.
    #[error("invalid container: {0}")]
    Container(#[from] InvalidContainer),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_code_mismatch_display() {
        let err = InvalidCode::CheckDigitMismatch {
            code: "KOCU8090117".to_string(),
            expected: 5,
            found: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("KOCU8090117"));
        assert!(msg.contains("expected 5"));
    }

    #[test]
    fn invalid_code_wrong_length_display() {
        let err = InvalidCode::WrongLength {
            code: "123456".to_string(),
            len: 6,
            expected: 11,
        };
        assert_eq!(
            err.to_string(),
            "container code \"123456\" has 6 characters (expected 11)"
        );
    }

    #[test]
    fn invalid_container_weight_display() {
        let err = InvalidContainer::GrossWeightOutOfRange {
            weight: 31,
            min: 4,
            max: 30,
        };
        assert_eq!(err.to_string(), "gross weight 31 t is not between 4 and 30 tonnes");
    }

    #[test]
    fn stowage_error_from_code() {
        let err: StowageError = InvalidCode::Empty.into();
        assert!(matches!(err, StowageError::Code(InvalidCode::Empty)));
        assert!(err.to_string().starts_with("invalid code"));
    }

    #[test]
    fn stowage_error_from_container() {
        let err: StowageError = InvalidContainer::UnknownKind("tanker".to_string()).into();
        assert!(err.to_string().contains("tanker"));
    }
}
