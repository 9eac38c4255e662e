//! Constants used throughout the Strata core crate.
//!
//! Generation parameters and display defaults live here so the generator, the validator
//! and the table agree on the same ranges.

use std::ops::{Range, RangeInclusive};

/// Number of patients generated when no population size is configured.
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Upper bound accepted for a configured population size.
pub const MAX_POPULATION_SIZE: usize = 100_000;

/// Rows per patient table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Ages drawn by the generator (65 up to, not including, 95).
pub const GENERATED_AGE: Range<u8> = 65..95;

/// Ages accepted when validating imported records.
pub const PLAUSIBLE_AGE: RangeInclusive<u8> = 60..=120;

/// Lowest generated HCC score.
pub const HCC_SCORE_FLOOR: f64 = 0.8;

/// Width of the generated HCC score interval.
pub const HCC_SCORE_SPAN: f64 = 3.0;

/// Probability a generated patient carries a dementia diagnosis.
pub const DEMENTIA_PREVALENCE: f64 = 0.35;

/// Probability a generated patient is dual eligible.
pub const DUAL_ELIGIBLE_PREVALENCE: f64 = 0.4;

/// Probability the uniform tier draw is replaced by a high-risk tier.
pub const HIGH_RISK_OVERRIDE: f64 = 0.4;

/// Within an override, probability of tier 1 rather than tier 2.
pub const CRITICAL_SHARE_OF_OVERRIDE: f64 = 0.6;

/// Last ED visits fall within this many days before the as-of instant.
pub const ED_VISIT_LOOKBACK_DAYS: i64 = 180;

/// Maximum number of care-gap draws per patient.
pub const MAX_GAP_DRAWS: usize = 3;
