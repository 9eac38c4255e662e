//! Patient record validation.
//!
//! Generated records satisfy these rules by construction. Records arriving from a fixture
//! are checked here before they are admitted to a repository.

use crate::constants::PLAUSIBLE_AGE;
use crate::{Patient, StrataError, StrataResult};
use std::collections::HashSet;

/// Validates a single patient against the record invariants.
///
/// Checks that:
/// - `hcc_score` is finite and strictly positive
/// - `age` lies within [`PLAUSIBLE_AGE`]
/// - name, facility, state and provider are non-empty
/// - `flagged_gaps` contains no empty or duplicate labels
///
/// The risk tier and identifier are already guaranteed by their types.
///
/// # Errors
///
/// Returns `StrataError::InvalidPatient` naming the first violated rule.
pub fn validate_patient(patient: &Patient) -> StrataResult<()> {
    let invalid = |reason: String| StrataError::InvalidPatient {
        id: patient.id.to_string(),
        reason,
    };

    if !patient.hcc_score.is_finite() || patient.hcc_score <= 0.0 {
        return Err(invalid(format!(
            "hcc score must be a positive number, got {}",
            patient.hcc_score
        )));
    }

    if !PLAUSIBLE_AGE.contains(&patient.age) {
        return Err(invalid(format!(
            "age {} outside plausible range {}..={}",
            patient.age,
            PLAUSIBLE_AGE.start(),
            PLAUSIBLE_AGE.end()
        )));
    }

    for (field, value) in [
        ("name", &patient.name),
        ("facility", &patient.facility),
        ("state", &patient.state),
        ("provider", &patient.provider),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(format!("{field} cannot be empty")));
        }
    }

    let mut seen = HashSet::new();
    for gap in &patient.flagged_gaps {
        if gap.trim().is_empty() {
            return Err(invalid("care gap label cannot be empty".into()));
        }
        if !seen.insert(gap.as_str()) {
            return Err(invalid(format!("duplicate care gap '{gap}'")));
        }
    }

    Ok(())
}

/// Validates every patient and rejects repeated identifiers.
///
/// # Errors
///
/// Returns the first `InvalidPatient` or `DuplicatePatientId` encountered.
pub fn validate_population(patients: &[Patient]) -> StrataResult<()> {
    let mut ids = HashSet::with_capacity(patients.len());
    for patient in patients {
        validate_patient(patient)?;
        if !ids.insert(&patient.id) {
            return Err(StrataError::DuplicatePatientId(patient.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fixtures::patient;

    #[test]
    fn test_validate_patient_accepts_fixture() {
        assert!(validate_patient(&patient(1)).is_ok());
    }

    #[test]
    fn test_validate_patient_rejects_non_positive_hcc() {
        let mut p = patient(1);
        p.hcc_score = 0.0;
        let err = validate_patient(&p).expect_err("should reject zero score");
        assert!(matches!(err, StrataError::InvalidPatient { reason, .. } if reason.contains("hcc score")));

        p.hcc_score = f64::NAN;
        assert!(validate_patient(&p).is_err());
    }

    #[test]
    fn test_validate_patient_rejects_implausible_age() {
        let mut p = patient(1);
        p.age = 12;
        let err = validate_patient(&p).expect_err("should reject age");
        assert!(matches!(err, StrataError::InvalidPatient { id, .. } if id == "P00001"));
    }

    #[test]
    fn test_validate_patient_rejects_duplicate_gaps() {
        let mut p = patient(1);
        p.flagged_gaps = vec!["Flu Vaccine".into(), "Flu Vaccine".into()];
        let err = validate_patient(&p).expect_err("should reject duplicate gap");
        assert!(matches!(err, StrataError::InvalidPatient { reason, .. } if reason.contains("duplicate care gap")));
    }

    #[test]
    fn test_validate_patient_rejects_empty_provider() {
        let mut p = patient(1);
        p.provider = "  ".into();
        let err = validate_patient(&p).expect_err("should reject empty provider");
        assert!(matches!(err, StrataError::InvalidPatient { reason, .. } if reason.contains("provider")));
    }

    #[test]
    fn test_validate_population_rejects_duplicate_ids() {
        let err = validate_population(&[patient(3), patient(4), patient(3)])
            .expect_err("should reject duplicate id");
        assert!(matches!(err, StrataError::DuplicatePatientId(id) if id == "P00003"));
    }
}
