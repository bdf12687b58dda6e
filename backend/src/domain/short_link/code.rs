//! Short-code values and their generation.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Number of characters in every short code.
pub const SHORT_CODE_LENGTH: usize = 8;

/// Validation errors for [`ShortCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortCodeValidationError {
    /// Length differs from the fixed code length.
    #[error("short code must be {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    /// Character outside `[A-Za-z0-9]`.
    #[error("short code may only contain ASCII letters and digits")]
    InvalidCharacter,
}

/// Eight-character `[A-Za-z0-9]` token identifying a short link.
///
/// # Examples
/// ```
/// use foodgram::domain::ShortCode;
///
/// assert!(ShortCode::parse("aB3dE5gH").is_ok());
/// assert!(ShortCode::parse("short").is_err());
/// assert!(ShortCode::parse("with-dsh").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Validate a code received from a client or the store.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ShortCodeValidationError> {
        let raw = raw.into();
        let actual = raw.chars().count();
        if actual != SHORT_CODE_LENGTH {
            return Err(ShortCodeValidationError::WrongLength {
                expected: SHORT_CODE_LENGTH,
                actual,
            });
        }
        if !raw.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            return Err(ShortCodeValidationError::InvalidCharacter);
        }
        Ok(Self(raw))
    }

    /// Borrow the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = ShortCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

/// Source of candidate short codes.
pub trait ShortCodeGenerator: Send + Sync {
    /// Produce a fresh candidate. Uniqueness is checked by the store.
    fn generate(&self) -> ShortCode;
}

/// Uniform sampling over 62^8 codes from the thread-local CSPRNG.
///
/// `rand::thread_rng` is a ChaCha-based generator reseeded from the OS, so
/// issued codes give no shortcut to enumerating other recipes' codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShortCodeGenerator;

impl ShortCodeGenerator for RandomShortCodeGenerator {
    fn generate(&self) -> ShortCode {
        let raw: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SHORT_CODE_LENGTH)
            .map(char::from)
            .collect();
        ShortCode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("", ShortCodeValidationError::WrongLength { expected: 8, actual: 0 })]
    #[case("abcdefghi", ShortCodeValidationError::WrongLength { expected: 8, actual: 9 })]
    #[case("abc_efgh", ShortCodeValidationError::InvalidCharacter)]
    #[case("abcdéfgh", ShortCodeValidationError::InvalidCharacter)]
    fn parse_rejects_malformed_codes(
        #[case] raw: &str,
        #[case] expected: ShortCodeValidationError,
    ) {
        assert_eq!(ShortCode::parse(raw), Err(expected));
    }

    #[test]
    fn generated_codes_are_well_formed() {
        let generator = RandomShortCodeGenerator;
        for _ in 0..256 {
            let code = generator.generate();
            assert!(ShortCode::parse(code.as_str()).is_ok(), "bad code {code}");
        }
    }

    #[test]
    fn generated_codes_do_not_repeat_in_small_samples() {
        let generator = RandomShortCodeGenerator;
        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 1_000);
    }
}
