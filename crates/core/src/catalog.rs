//! Reference catalogue of facilities, states, providers and care gaps.
//!
//! The generator draws from these lists and the CLI offers them as filter choices.
//! Filtering by a state with no facility (TX, WA) is valid and yields no patients.

use serde::Serialize;

/// A care facility and the state it operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Facility {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Provider {
    pub id: &'static str,
    pub name: &'static str,
}

pub const FACILITIES: [Facility; 5] = [
    Facility {
        id: "fac1",
        name: "Sunshine Senior Living",
        state: "CA",
    },
    Facility {
        id: "fac2",
        name: "Golden Years Care Center",
        state: "FL",
    },
    Facility {
        id: "fac3",
        name: "Mountain View Retirement",
        state: "CO",
    },
    Facility {
        id: "fac4",
        name: "Seaside Elder Care",
        state: "MA",
    },
    Facility {
        id: "fac5",
        name: "Parkview Assisted Living",
        state: "NY",
    },
];

pub const STATES: [&str; 7] = ["CA", "FL", "CO", "MA", "NY", "TX", "WA"];

pub const PROVIDERS: [Provider; 5] = [
    Provider {
        id: "prov1",
        name: "Dr. Sarah Johnson",
    },
    Provider {
        id: "prov2",
        name: "Dr. Michael Chen",
    },
    Provider {
        id: "prov3",
        name: "Dr. Emily Rodriguez",
    },
    Provider {
        id: "prov4",
        name: "Dr. David Kim",
    },
    Provider {
        id: "prov5",
        name: "Dr. Lisa Thompson",
    },
];

pub const PATIENT_NAMES: [&str; 20] = [
    "John Smith",
    "Mary Johnson",
    "Robert Williams",
    "Patricia Brown",
    "James Jones",
    "Jennifer Miller",
    "Michael Davis",
    "Linda Garcia",
    "William Rodriguez",
    "Elizabeth Martinez",
    "David Anderson",
    "Barbara Thomas",
    "Richard Jackson",
    "Susan White",
    "Joseph Harris",
    "Margaret Martin",
    "Charles Thompson",
    "Jessica Garcia",
    "Thomas Martinez",
    "Sarah Robinson",
];

pub const CARE_GAPS: [&str; 10] = [
    "Annual Wellness Visit",
    "Medication Review",
    "Depression Screening",
    "Diabetes Eye Exam",
    "Blood Pressure Check",
    "Colorectal Screening",
    "Fall Risk Assessment",
    "Advance Care Planning",
    "Pneumonia Vaccine",
    "Flu Vaccine",
];

/// Looks up a facility by its display name (exact match).
pub fn facility_by_name(name: &str) -> Option<&'static Facility> {
    FACILITIES.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_facility_state_is_listed() {
        for facility in FACILITIES {
            assert!(STATES.contains(&facility.state), "{}", facility.name);
        }
    }

    #[test]
    fn test_catalogue_labels_are_unique() {
        let gaps: HashSet<_> = CARE_GAPS.iter().collect();
        assert_eq!(gaps.len(), CARE_GAPS.len());
        let providers: HashSet<_> = PROVIDERS.iter().map(|p| p.name).collect();
        assert_eq!(providers.len(), PROVIDERS.len());
    }

    #[test]
    fn test_facility_by_name_is_exact() {
        assert_eq!(
            facility_by_name("Seaside Elder Care").map(|f| f.state),
            Some("MA")
        );
        assert!(facility_by_name("seaside elder care").is_none());
    }
}
