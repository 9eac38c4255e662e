//! Patient repository.
//!
//! Owns the canonical patient collection. A repository is built once, either by seeded
//! generation or from a validated fixture, and is read-only afterwards. Callers share it
//! behind an `Arc` and pass it explicitly to whatever needs it.

use crate::catalog::{CARE_GAPS, FACILITIES, PATIENT_NAMES, PROVIDERS};
use crate::constants::{
    CRITICAL_SHARE_OF_OVERRIDE, DEMENTIA_PREVALENCE, DUAL_ELIGIBLE_PREVALENCE,
    ED_VISIT_LOOKBACK_DAYS, GENERATED_AGE, HCC_SCORE_FLOOR, HCC_SCORE_SPAN, HIGH_RISK_OVERRIDE,
    MAX_GAP_DRAWS,
};
use crate::validation::validate_population;
use crate::{CoreConfig, Patient, StrataError, StrataResult};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use strata_types::{PatientId, RiskTier};

/// Immutable, in-memory patient store.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    patients: Vec<Patient>,
    seed: Option<u64>,
}

impl PatientRepository {
    /// Generates `size` synthetic patients.
    ///
    /// The output is fully determined by `seed`, `size` and `as_of`, so two calls with
    /// the same arguments produce identical collections. ED visits are placed up to
    /// [`ED_VISIT_LOOKBACK_DAYS`] days before `as_of`.
    pub fn generate(seed: u64, size: usize, as_of: DateTime<Utc>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let patients: Vec<Patient> = (1u32..)
            .take(size)
            .map(|sequence| generate_patient(&mut rng, sequence, as_of))
            .collect();

        tracing::info!(seed, size = patients.len(), "generated synthetic patient population");

        Self {
            patients,
            seed: Some(seed),
        }
    }

    /// Generates the population described by `cfg`.
    ///
    /// When the configuration carries no seed, one is drawn from ambient randomness and
    /// logged so the run can be reproduced.
    pub fn from_config(cfg: &CoreConfig, as_of: DateTime<Utc>) -> Self {
        let seed = match cfg.seed() {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::info!(seed, "no seed configured, drew one");
                seed
            }
        };
        Self::generate(seed, cfg.population_size(), as_of)
    }

    /// Builds a repository from pre-built records.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidPatient` or `StrataError::DuplicatePatientId` if any
    /// record breaks the patient invariants.
    pub fn from_patients(patients: Vec<Patient>) -> StrataResult<Self> {
        if let Err(e) = validate_population(&patients) {
            tracing::warn!("rejected patient fixture: {}", e);
            return Err(e);
        }

        tracing::info!(size = patients.len(), "loaded patient fixture");
        Ok(Self {
            patients,
            seed: None,
        })
    }

    /// Builds a repository from a JSON array of patient records.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Deserialization` for malformed JSON, or a validation error as
    /// in [`PatientRepository::from_patients`].
    pub fn from_json(json: &str) -> StrataResult<Self> {
        let patients: Vec<Patient> =
            serde_json::from_str(json).map_err(StrataError::Deserialization)?;
        Self::from_patients(patients)
    }

    /// Serializes the collection as a pretty-printed JSON array.
    pub fn to_json(&self) -> StrataResult<String> {
        serde_json::to_string_pretty(&self.patients).map_err(StrataError::Serialization)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn get(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| &p.id == id)
    }

    /// Seed the collection was generated from; `None` for fixtures.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn generate_patient<R: Rng + ?Sized>(rng: &mut R, sequence: u32, as_of: DateTime<Utc>) -> Patient {
    let base_tier = RiskTier::ALL[rng.gen_range(0..RiskTier::ALL.len())];
    let facility = &FACILITIES[rng.gen_range(0..FACILITIES.len())];
    let provider = &PROVIDERS[rng.gen_range(0..PROVIDERS.len())];

    // Skew towards tiers 1 and 2.
    let risk_tier = if rng.gen_bool(HIGH_RISK_OVERRIDE) {
        if rng.gen_bool(CRITICAL_SHARE_OF_OVERRIDE) {
            RiskTier::Critical
        } else {
            RiskTier::High
        }
    } else {
        base_tier
    };

    let last_ed_visit = as_of - Duration::days(rng.gen_range(0..ED_VISIT_LOOKBACK_DAYS));

    let draws = rng.gen_range(1..=MAX_GAP_DRAWS);
    let mut flagged_gaps: Vec<String> = Vec::with_capacity(draws);
    for _ in 0..draws {
        let gap = CARE_GAPS[rng.gen_range(0..CARE_GAPS.len())];
        if !flagged_gaps.iter().any(|g| g == gap) {
            flagged_gaps.push(gap.to_string());
        }
    }

    let hcc_score = round_to_cents(rng.gen::<f64>() * HCC_SCORE_SPAN + HCC_SCORE_FLOOR);

    Patient {
        id: PatientId::from_sequence(sequence),
        name: PATIENT_NAMES[rng.gen_range(0..PATIENT_NAMES.len())].to_string(),
        age: rng.gen_range(GENERATED_AGE),
        hcc_score,
        dementia: rng.gen_bool(DEMENTIA_PREVALENCE),
        dual_eligible: rng.gen_bool(DUAL_ELIGIBLE_PREVALENCE),
        risk_tier,
        last_ed_visit,
        flagged_gaps,
        facility: facility.name.to_string(),
        state: facility.state.to_string(),
        provider: provider.name.to_string(),
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
