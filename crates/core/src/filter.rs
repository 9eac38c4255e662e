//! Filter engine and filter control transitions.
//!
//! A [`FilterSpecification`] is a complete snapshot of the dashboard's active query. Every
//! control interaction consumes the current snapshot and returns a new one, so derived
//! views always see a single consistent value.

use crate::Patient;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use strata_types::{DateRange, RiskTier};

/// Select-control value meaning "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// The active dashboard query.
///
/// `None` (or an empty name) leaves a dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpecification {
    pub date_range: DateRange,
    pub facility: Option<String>,
    pub state: Option<String>,
    pub provider: Option<String>,
    pub risk_tier: Option<RiskTier>,
    pub cognitive_impairment: Option<bool>,
    pub dual_status: Option<bool>,
}

fn active(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|n| !n.is_empty())
}

impl FilterSpecification {
    /// True when `patient` satisfies every active predicate.
    ///
    /// Name comparisons are exact and case-sensitive.
    pub fn matches(&self, patient: &Patient) -> bool {
        active(&self.facility).map_or(true, |f| patient.facility == f)
            && active(&self.state).map_or(true, |s| patient.state == s)
            && active(&self.provider).map_or(true, |p| patient.provider == p)
            && self.risk_tier.map_or(true, |t| patient.risk_tier == t)
            && self.cognitive_impairment.map_or(true, |d| patient.dementia == d)
            && self.dual_status.map_or(true, |d| patient.dual_eligible == d)
    }

    /// True when no dimension other than the date range is constrained.
    pub fn is_unconstrained(&self) -> bool {
        active(&self.facility).is_none()
            && active(&self.state).is_none()
            && active(&self.provider).is_none()
            && self.risk_tier.is_none()
            && self.cognitive_impairment.is_none()
            && self.dual_status.is_none()
    }

    pub fn with_date_range(self, date_range: DateRange) -> Self {
        Self { date_range, ..self }
    }

    pub fn with_facility(self, facility: Option<String>) -> Self {
        Self { facility, ..self }
    }

    pub fn with_state(self, state: Option<String>) -> Self {
        Self { state, ..self }
    }

    pub fn with_provider(self, provider: Option<String>) -> Self {
        Self { provider, ..self }
    }

    pub fn with_risk_tier(self, risk_tier: Option<RiskTier>) -> Self {
        Self { risk_tier, ..self }
    }

    pub fn with_cognitive_impairment(self, cognitive_impairment: Option<bool>) -> Self {
        Self {
            cognitive_impairment,
            ..self
        }
    }

    pub fn with_dual_status(self, dual_status: Option<bool>) -> Self {
        Self {
            dual_status,
            ..self
        }
    }

    /// Sidebar tier button: clicking the selected tier clears it, any other tier selects it.
    pub fn toggle_risk_tier(self, tier: RiskTier) -> Self {
        let risk_tier = if self.risk_tier == Some(tier) {
            None
        } else {
            Some(tier)
        };
        Self { risk_tier, ..self }
    }

    /// Sidebar cognitive-impairment switch.
    pub fn switch_cognitive_impairment(self, checked: bool) -> Self {
        let cognitive_impairment = switch_flag(self.cognitive_impairment, checked);
        Self {
            cognitive_impairment,
            ..self
        }
    }

    /// Sidebar dual-eligibility switch.
    pub fn switch_dual_status(self, checked: bool) -> Self {
        let dual_status = switch_flag(self.dual_status, checked);
        Self {
            dual_status,
            ..self
        }
    }
}

/// Maps a select control value to a filter value; [`ALL_SENTINEL`] and blanks mean unset.
pub fn parse_select_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ALL_SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Tri-state switch transition.
///
/// Turning the switch on always selects `true`. Turning it off clears a `true` selection
/// and otherwise re-selects `true`, since the switch only ever shows the `true` state.
pub fn switch_flag(current: Option<bool>, checked: bool) -> Option<bool> {
    if checked || current != Some(true) {
        Some(true)
    } else {
        None
    }
}

/// Number of matches kept for a date range: `floor(count * days / 90)`.
///
/// The range does not look at visit dates; it keeps a leading share of the matches.
pub fn truncation_limit(count: usize, date_range: DateRange) -> usize {
    count * date_range.days() as usize / DateRange::FULL_WINDOW_DAYS as usize
}

/// Returns the patients matching every active predicate in `spec`, in input order, cut to
/// the date-range share.
///
/// The input is never modified. An empty result is a normal outcome.
pub fn select_patients<'a, P>(all: &'a [P], spec: &FilterSpecification) -> Vec<&'a Patient>
where
    P: Borrow<Patient>,
{
    let mut matched: Vec<&Patient> = all
        .iter()
        .map(<P as Borrow<Patient>>::borrow)
        .filter(|p| spec.matches(p))
        .collect();

    let limit = truncation_limit(matched.len(), spec.date_range);
    matched.truncate(limit);

    tracing::debug!(
        input = all.len(),
        selected = matched.len(),
        date_range = spec.date_range.days(),
        "selected patients"
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fixtures::{as_of, patient};
    use crate::PatientRepository;

    fn full_window() -> FilterSpecification {
        FilterSpecification::default().with_date_range(DateRange::Last90Days)
    }

    #[test]
    fn test_unconstrained_ninety_day_selection_returns_everything() {
        let repo = PatientRepository::generate(42, 100, as_of());
        let selected = select_patients(repo.patients(), &full_window());
        assert_eq!(selected.len(), 100);
        for (a, b) in selected.iter().zip(repo.patients()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_date_range_keeps_leading_share() {
        let patients: Vec<Patient> = (1..=10).map(patient).collect();
        let thirty = select_patients(&patients, &FilterSpecification::default());
        let sixty = select_patients(
            &patients,
            &FilterSpecification::default().with_date_range(DateRange::Last60Days),
        );
        assert_eq!(thirty.len(), 3);
        assert_eq!(sixty.len(), 6);
        assert_eq!(thirty[0].id.as_str(), "P00001");
        assert_eq!(thirty[2].id.as_str(), "P00003");
    }

    #[test]
    fn test_truncation_limit_floors() {
        assert_eq!(truncation_limit(0, DateRange::Last30Days), 0);
        assert_eq!(truncation_limit(2, DateRange::Last30Days), 0);
        assert_eq!(truncation_limit(3, DateRange::Last30Days), 1);
        assert_eq!(truncation_limit(100, DateRange::Last30Days), 33);
        assert_eq!(truncation_limit(100, DateRange::Last60Days), 66);
        assert_eq!(truncation_limit(100, DateRange::Last90Days), 100);
    }

    #[test]
    fn test_facility_filter_is_exact_and_case_sensitive() {
        let repo = PatientRepository::generate(42, 100, as_of());
        let spec = full_window().with_facility(Some("Sunshine Senior Living".into()));
        let selected = select_patients(repo.patients(), &spec);
        let expected = repo
            .patients()
            .iter()
            .filter(|p| p.facility == "Sunshine Senior Living")
            .count();
        assert_eq!(selected.len(), expected);
        assert!(selected.iter().all(|p| p.facility == "Sunshine Senior Living"));

        let lowercase = full_window().with_facility(Some("sunshine senior living".into()));
        assert!(select_patients(repo.patients(), &lowercase).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let mut a = patient(1);
        a.dementia = true;
        a.dual_eligible = true;
        let mut b = patient(2);
        b.dementia = true;
        let mut c = patient(3);
        c.dual_eligible = true;
        let patients = vec![a, b, c];

        let spec = full_window()
            .with_cognitive_impairment(Some(true))
            .with_dual_status(Some(true));
        let ids: Vec<_> = select_patients(&patients, &spec)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["P00001"]);

        let spec = full_window().with_cognitive_impairment(Some(false));
        let ids: Vec<_> = select_patients(&patients, &spec)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["P00003"]);
    }

    #[test]
    fn test_absent_tier_selects_nothing() {
        let patients: Vec<Patient> = (1..=5).map(patient).collect();
        let spec = full_window().with_risk_tier(Some(RiskTier::Critical));
        assert!(select_patients(&patients, &spec).is_empty());
    }

    #[test]
    fn test_state_without_facility_selects_nothing() {
        let repo = PatientRepository::generate(42, 100, as_of());
        let spec = full_window().with_state(Some("TX".into()));
        assert!(select_patients(repo.patients(), &spec).is_empty());
    }

    #[test]
    fn test_empty_name_is_unconstrained() {
        let patients: Vec<Patient> = (1..=3).map(patient).collect();
        let spec = full_window().with_provider(Some(String::new()));
        assert!(spec.is_unconstrained());
        assert_eq!(select_patients(&patients, &spec).len(), 3);
    }

    #[test]
    fn test_select_accepts_borrowed_input() {
        let patients: Vec<Patient> = (1..=3).map(patient).collect();
        let refs: Vec<&Patient> = patients.iter().collect();
        assert_eq!(select_patients(&refs, &full_window()).len(), 3);
    }

    #[test]
    fn test_toggle_risk_tier() {
        let spec = FilterSpecification::default().toggle_risk_tier(RiskTier::High);
        assert_eq!(spec.risk_tier, Some(RiskTier::High));
        let spec = spec.toggle_risk_tier(RiskTier::Low);
        assert_eq!(spec.risk_tier, Some(RiskTier::Low));
        let spec = spec.toggle_risk_tier(RiskTier::Low);
        assert_eq!(spec.risk_tier, None);
    }

    #[test]
    fn test_switch_flag_transitions() {
        assert_eq!(switch_flag(None, true), Some(true));
        assert_eq!(switch_flag(Some(false), true), Some(true));
        assert_eq!(switch_flag(Some(true), false), None);
        assert_eq!(switch_flag(None, false), Some(true));
        assert_eq!(switch_flag(Some(false), false), Some(true));

        let spec = FilterSpecification::default()
            .switch_dual_status(true)
            .switch_cognitive_impairment(true)
            .switch_cognitive_impairment(false);
        assert_eq!(spec.dual_status, Some(true));
        assert_eq!(spec.cognitive_impairment, None);
    }

    #[test]
    fn test_parse_select_value_maps_sentinel() {
        assert_eq!(parse_select_value("all"), None);
        assert_eq!(parse_select_value("  "), None);
        assert_eq!(parse_select_value("CA"), Some("CA".to_string()));
    }

    #[test]
    fn test_filter_serializes_like_dashboard_state() {
        let spec = FilterSpecification::default().with_risk_tier(Some(RiskTier::Critical));
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["dateRange"], "30");
        assert_eq!(value["riskTier"], 1);
        assert!(value["facility"].is_null());
        assert!(value["cognitiveImpairment"].is_null());
    }
}
