//! # Container Identifier Codes
//!
//! [`IdentifierCode`] is the validated newtype for the 11-character label
//! painted on every freight container:
//!
//! ```text
//!  M S C   U   6 6 3 9 8 7   1
//!  └owner┘ │   └─ serial ─┘  └ check digit
//!          └ category
//! ```
//!
//! ## Validation
//!
//! - Exactly 11 characters.
//! - Characters 1-4 are ASCII uppercase letters. Any owner and category
//!   letters are accepted; there is no registry lookup.
//! - Characters 5-11 are ASCII digits.
//! - The eleventh character equals the check digit computed from the first
//!   ten by the selected [`CheckDigitScheme`].
//!
//! A constructed code is immutable and always self-consistent. Equality and
//! hashing compare the exact character sequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCode;

/// Number of characters in a container code.
pub const CODE_LENGTH: usize = 11;

/// Number of characters the check digit is computed over.
pub const BODY_LENGTH: usize = CODE_LENGTH - 1;

/// Owner prefix (3) plus category letter (1).
const LETTER_COUNT: usize = 4;

/// ISO 6346 letter values: `A` = 10 upward, skipping multiples of 11.
const ISO_6346_LETTER_VALUES: [u32; 26] = [
    10, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 34, 35,
    36, 37, 38,
];

/// Rule used to derive the check digit from the first ten characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckDigitScheme {
    /// Letters `A`..`Z` count 10..35, digits count their face value; the
    /// check digit is the last decimal digit of the plain sum.
    #[default]
    Summed,
    /// ISO 6346: letters from the ISO table, each position weighted by
    /// `2^i`, sum reduced modulo 11 with a remainder of 10 read as 0.
    Iso6346,
}

impl CheckDigitScheme {
    /// Compute the check digit for a 10-character code body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCode`] if `body` is not four uppercase letters
    /// followed by six digits.
    pub fn check_digit(self, body: &str) -> Result<u8, InvalidCode> {
        validate_shape(body, BODY_LENGTH)?;
        Ok(self.compute(body.as_bytes()))
    }

    /// Compute over a body whose shape has already been validated.
    fn compute(self, body: &[u8]) -> u8 {
        let digit = match self {
            Self::Summed => {
                let sum: u32 = body.iter().map(|&b| summed_value(b)).sum();
                sum % 10
            }
            Self::Iso6346 => {
                let sum: u32 = body
                    .iter()
                    .enumerate()
                    .map(|(i, &b)| iso_value(b) << i)
                    .sum();
                sum % 11 % 10
            }
        };
        digit as u8
    }
}

impl fmt::Display for CheckDigitScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Summed => "summed",
            Self::Iso6346 => "iso6346",
        };
        f.write_str(s)
    }
}

fn summed_value(b: u8) -> u32 {
    if b.is_ascii_uppercase() {
        u32::from(b - b'A') + 10
    } else {
        u32::from(b - b'0')
    }
}

fn iso_value(b: u8) -> u32 {
    if b.is_ascii_uppercase() {
        ISO_6346_LETTER_VALUES[usize::from(b - b'A')]
    } else {
        u32::from(b - b'0')
    }
}

/// Check length and per-position letter/digit shape.
fn validate_shape(raw: &str, expected: usize) -> Result<(), InvalidCode> {
    if raw.is_empty() {
        return Err(InvalidCode::Empty);
    }

    let len = raw.chars().count();
    if len != expected {
        return Err(InvalidCode::WrongLength {
            code: raw.to_string(),
            len,
            expected,
        });
    }

    for (i, c) in raw.chars().enumerate() {
        if i < LETTER_COUNT {
            if !c.is_ascii_uppercase() {
                return Err(InvalidCode::ExpectedLetter {
                    code: raw.to_string(),
                    position: i + 1,
                    found: c,
                });
            }
        } else if !c.is_ascii_digit() {
            return Err(InvalidCode::ExpectedDigit {
                code: raw.to_string(),
                position: i + 1,
                found: c,
            });
        }
    }

    Ok(())
}

/// A checksum-validated container identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IdentifierCode(String);

impl IdentifierCode {
    /// Parse a code using the default [`CheckDigitScheme::Summed`] rule.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCode`] if the input is empty, not 11 characters,
    /// has a non-letter in positions 1-4 or a non-digit in positions 5-11,
    /// or if its check digit does not match.
    pub fn parse(raw: &str) -> Result<Self, InvalidCode> {
        Self::parse_with(raw, CheckDigitScheme::default())
    }

    /// Parse a code, verifying its check digit with `scheme`.
    pub fn parse_with(raw: &str, scheme: CheckDigitScheme) -> Result<Self, InvalidCode> {
        validate_shape(raw, CODE_LENGTH)?;

        // Shape validation guarantees ASCII, so byte indexing is exact.
        let bytes = raw.as_bytes();
        let expected = scheme.compute(&bytes[..BODY_LENGTH]);
        let found = bytes[BODY_LENGTH] - b'0';
        if expected != found {
            return Err(InvalidCode::CheckDigitMismatch {
                code: raw.to_string(),
                expected,
                found,
            });
        }

        Ok(Self(raw.to_string()))
    }

    /// The full 11-character code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Three-letter owner prefix.
    pub fn owner(&self) -> &str {
        &self.0[..3]
    }

    /// Category letter (usually `U` for freight containers).
    pub fn category(&self) -> char {
        char::from(self.0.as_bytes()[3])
    }

    /// Six-digit serial number.
    pub fn serial(&self) -> &str {
        &self.0[LETTER_COUNT..BODY_LENGTH]
    }

    /// Declared check digit.
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[BODY_LENGTH] - b'0'
    }
}

impl fmt::Display for IdentifierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentifierCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for IdentifierCode {
    type Err = InvalidCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for IdentifierCode {
    type Error = InvalidCode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for IdentifierCode {
    type Error = InvalidCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// Routes through `parse` so invalid codes are rejected at deserialization
// time rather than silently accepted.
impl<'de> Deserialize<'de> for IdentifierCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
