//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the repository
//! and dashboard service. The core never reads process-wide environment variables itself;
//! binaries read them and hand the raw values to the parsers in this module.

use crate::constants::{
    DEFAULT_PAGE_SIZE, DEFAULT_POPULATION_SIZE, MAX_PAGE_SIZE, MAX_POPULATION_SIZE,
};
use crate::{StrataError, StrataResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    population_size: usize,
    page_size: usize,
    seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidInput` if `population_size` is outside
    /// `1..=MAX_POPULATION_SIZE` or `page_size` is outside `1..=MAX_PAGE_SIZE`.
    pub fn new(population_size: usize, page_size: usize, seed: Option<u64>) -> StrataResult<Self> {
        if population_size == 0 || population_size > MAX_POPULATION_SIZE {
            return Err(StrataError::InvalidInput(format!(
                "population size must be between 1 and {MAX_POPULATION_SIZE}, got {population_size}"
            )));
        }

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(StrataError::InvalidInput(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        Ok(Self {
            population_size,
            page_size,
            seed,
        })
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Seed for population generation; `None` means draw one at startup.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a generation seed from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `Ok(None)`.
pub fn seed_from_env_value(value: Option<String>) -> StrataResult<Option<u64>> {
    non_blank(value)
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| StrataError::InvalidInput(format!("seed must be an unsigned integer, got '{v}'")))
        })
        .transpose()
}

/// Parse a positive size (population or page size) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn size_from_env_value(name: &str, value: Option<String>, default: usize) -> StrataResult<usize> {
    match non_blank(value) {
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| StrataError::InvalidInput(format!("{name} must be a positive integer, got '{v}'"))),
        None => Ok(default),
    }
}
