use crate::TypesError;
use std::{fmt, str::FromStr};

/// Stable patient identifier in canonical form: `P` followed by at least five digits.
///
/// Sequence numbers are zero-padded to five digits (`P00042`). Larger sequence numbers
/// simply grow the digit run (`P123456`).
///
/// # Construction
/// - [`PatientId::from_sequence`] allocates the identifier for a generated record.
/// - [`PatientId::parse`] validates an externally supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(String);

impl PatientId {
    const PREFIX: char = 'P';
    const MIN_DIGITS: usize = 5;

    /// Builds the canonical identifier for the `sequence`-th generated patient.
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format!("{}{:05}", Self::PREFIX, sequence))
    }

    /// Validates and wraps an identifier that must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidPatientId`] if `input` is not canonical.
    pub fn parse(input: &str) -> Result<Self, TypesError> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(TypesError::InvalidPatientId(input.to_owned()))
    }

    /// Returns true if `input` is `P` followed by at least five ASCII digits.
    pub fn is_canonical(input: &str) -> bool {
        match input.strip_prefix(Self::PREFIX) {
            Some(digits) => {
                digits.len() >= Self::MIN_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_pads_to_five_digits() {
        assert_eq!(PatientId::from_sequence(1).as_str(), "P00001");
        assert_eq!(PatientId::from_sequence(100).as_str(), "P00100");
        assert_eq!(PatientId::from_sequence(123_456).as_str(), "P123456");
    }

    #[test]
    fn test_parse_accepts_canonical() {
        let id = PatientId::parse("P00042").expect("canonical id");
        assert_eq!(id.to_string(), "P00042");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "P", "P123", "p00001", "X00001", "P0000a", " P00001"] {
            let err = PatientId::parse(bad).expect_err("should reject malformed id");
            assert!(matches!(err, TypesError::InvalidPatientId(_)));
        }
    }

    #[test]
    fn test_ordering_matches_sequence_for_padded_ids() {
        assert!(PatientId::from_sequence(9) < PatientId::from_sequence(10));
    }
}
