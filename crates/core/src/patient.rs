//! The patient record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_types::{PatientId, RiskTier};

/// One individual under care.
///
/// Records are never mutated after they enter a [`crate::PatientRepository`]; every
/// derived view borrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u8,
    pub hcc_score: f64,
    /// Cognitive-impairment flag.
    pub dementia: bool,
    pub dual_eligible: bool,
    pub risk_tier: RiskTier,
    #[serde(rename = "lastEDVisit")]
    pub last_ed_visit: DateTime<Utc>,
    /// Care-gap labels, unique within a patient.
    pub flagged_gaps: Vec<String>,
    pub facility: String,
    pub state: String,
    pub provider: String,
}

impl Patient {
    pub fn has_gap(&self, label: &str) -> bool {
        self.flagged_gaps.iter().any(|g| g == label)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Fixed instant used as "now" across the crate's tests.
    pub fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// A valid patient with predictable values; tests override what they care about.
    pub fn patient(sequence: u32) -> Patient {
        Patient {
            id: PatientId::from_sequence(sequence),
            name: "John Smith".into(),
            age: 80,
            hcc_score: 1.5,
            dementia: false,
            dual_eligible: false,
            risk_tier: RiskTier::Moderate,
            last_ed_visit: as_of(),
            flagged_gaps: vec!["Flu Vaccine".into()],
            facility: "Sunshine Senior Living".into(),
            state: "CA".into(),
            provider: "Dr. Sarah Johnson".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::patient;

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let value = serde_json::to_value(patient(7)).unwrap();
        assert_eq!(value["id"], "P00007");
        assert_eq!(value["hccScore"], 1.5);
        assert_eq!(value["dualEligible"], false);
        assert_eq!(value["riskTier"], 3);
        assert!(value["lastEDVisit"].as_str().unwrap().starts_with("2025-06-01T12:00:00"));
        assert_eq!(value["flaggedGaps"][0], "Flu Vaccine");
    }

    #[test]
    fn test_has_gap_is_exact() {
        let p = patient(1);
        assert!(p.has_gap("Flu Vaccine"));
        assert!(!p.has_gap("flu vaccine"));
    }
}
