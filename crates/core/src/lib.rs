//! # Strata Core
//!
//! Core logic for the Strata risk-stratification dashboard.
//!
//! This crate contains pure, in-memory data operations:
//! - Seeded generation of a synthetic senior-care patient population
//! - The filter engine (`select_patients`) over an immutable repository
//! - Aggregation into key metrics, the risk-tier breakdown and care-gap tallies
//! - Table ordering and pagination, chart slices and metric cards
//!
//! **No I/O**: the core never touches files, the network or the environment. Binaries
//! resolve configuration and hand it in.

pub mod aggregate;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod patient;
pub mod repository;
pub mod table;
pub mod validation;

pub use aggregate::{
    compute_care_gap_summary, compute_key_metrics, compute_risk_tier_breakdown, CareGapCount,
    KeyMetrics, RiskTierBreakdown,
};
pub use config::CoreConfig;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use error::{StrataError, StrataResult};
pub use filter::{select_patients, FilterSpecification};
pub use patient::Patient;
pub use repository::PatientRepository;
pub use table::{sort_and_page, Page, SortDirection, SortField, TableState};

// Re-export the value types so callers need only this crate.
pub use strata_types::{DateRange, PatientId, RiskTier, TypesError};
