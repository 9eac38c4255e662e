use crate::TypesError;
use std::{fmt, str::FromStr};

/// Ordinal risk category assigned to a patient.
///
/// Tier 1 is the most severe. Ordering follows the rank, so `Critical < Low`.
/// Serialized as its numeric rank (`1`..=`4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskTier {
    Critical = 1,
    High = 2,
    Moderate = 3,
    Low = 4,
}

impl RiskTier {
    /// All tiers in rank order.
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Critical,
        RiskTier::High,
        RiskTier::Moderate,
        RiskTier::Low,
    ];

    /// Numeric rank, 1 = highest risk.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Builds a tier from its numeric rank.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidRiskTier`] if `rank` is outside `1..=4`.
    pub fn from_rank(rank: u8) -> Result<Self, TypesError> {
        match rank {
            1 => Ok(Self::Critical),
            2 => Ok(Self::High),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::Low),
            other => Err(TypesError::InvalidRiskTier(other.to_string())),
        }
    }

    /// Human-readable severity label, e.g. "Critical Risk".
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical Risk",
            Self::High => "High Risk",
            Self::Moderate => "Moderate Risk",
            Self::Low => "Low Risk",
        }
    }

    /// Tiers 1 and 2 count towards the high-risk population.
    pub fn is_high_risk(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.rank())
    }
}

/// Accepts the bare rank (`"2"`) or the display form (`"Tier 2"`, `"tier2"`).
impl FromStr for RiskTier {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let digits = lowered
            .strip_prefix("tier")
            .map(str::trim)
            .unwrap_or(lowered.as_str());
        digits
            .parse::<u8>()
            .map_err(|_| TypesError::InvalidRiskTier(trimmed.to_owned()))
            .and_then(Self::from_rank)
    }
}

impl serde::Serialize for RiskTier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.rank())
    }
}

impl<'de> serde::Deserialize<'de> for RiskTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rank = u8::deserialize(deserializer)?;
        RiskTier::from_rank(rank).map_err(serde::de::Error::custom)
    }
}
