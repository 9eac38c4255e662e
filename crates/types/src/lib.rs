//! # Strata Types
//!
//! Validated value types shared by the Strata crates.
//!
//! Every type here guarantees its invariant once constructed, so downstream code never
//! has to re-check a risk tier, a date range window or a patient identifier.

mod id;
mod range;
mod tier;

pub use id::PatientId;
pub use range::DateRange;
pub use tier::RiskTier;

/// Errors that can occur when creating validated value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// Risk tiers are ranked 1 (most severe) to 4
    #[error("risk tier must be between 1 and 4, got: '{0}'")]
    InvalidRiskTier(String),
    /// Only the fixed 30/60/90 day windows are supported
    #[error("date range must be one of 30, 60 or 90, got: '{0}'")]
    InvalidDateRange(String),
    /// Patient identifiers are `P` followed by at least five digits
    #[error("patient id must be 'P' followed by at least 5 digits, got: '{0}'")]
    InvalidPatientId(String),
}
