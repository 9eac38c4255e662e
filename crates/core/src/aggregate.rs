//! Aggregation engine.
//!
//! Pure functions over a patient sequence. Every ratio defaults to zero for an empty
//! input rather than dividing by zero.

use crate::Patient;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use strata_types::RiskTier;

/// Summary statistics for the metric cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_patients: usize,
    pub percent_dual_eligible: f64,
    pub percent_cognitive_impairment: f64,
    pub avg_hcc_score: f64,
    /// Patients in tier 1 or 2.
    pub high_risk_patients: usize,
}

/// Share of patients in each tier, as percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTierBreakdown {
    #[serde(rename = "tier1Percent")]
    pub tier1_percent: f64,
    #[serde(rename = "tier2Percent")]
    pub tier2_percent: f64,
    #[serde(rename = "tier3Percent")]
    pub tier3_percent: f64,
    #[serde(rename = "tier4Percent")]
    pub tier4_percent: f64,
}

impl RiskTierBreakdown {
    pub fn percent(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Critical => self.tier1_percent,
            RiskTier::High => self.tier2_percent,
            RiskTier::Moderate => self.tier3_percent,
            RiskTier::Low => self.tier4_percent,
        }
    }

    pub fn total(&self) -> f64 {
        RiskTier::ALL.iter().map(|t| self.percent(*t)).sum()
    }
}

/// One row of the care-gap report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareGapCount {
    pub label: String,
    pub patients: usize,
    pub percent: f64,
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub fn compute_key_metrics<P: Borrow<Patient>>(patients: &[P]) -> KeyMetrics {
    let total_patients = patients.len();
    if total_patients == 0 {
        return KeyMetrics::default();
    }

    let mut dual_eligible = 0;
    let mut cognitive_impairment = 0;
    let mut high_risk_patients = 0;
    let mut total_hcc_score = 0.0;
    for patient in patients.iter().map(<P as Borrow<Patient>>::borrow) {
        dual_eligible += usize::from(patient.dual_eligible);
        cognitive_impairment += usize::from(patient.dementia);
        high_risk_patients += usize::from(patient.risk_tier.is_high_risk());
        total_hcc_score += patient.hcc_score;
    }

    let metrics = KeyMetrics {
        total_patients,
        percent_dual_eligible: percent_of(dual_eligible, total_patients),
        percent_cognitive_impairment: percent_of(cognitive_impairment, total_patients),
        avg_hcc_score: total_hcc_score / total_patients as f64,
        high_risk_patients,
    };
    tracing::debug!(?metrics, "computed key metrics");
    metrics
}

pub fn compute_risk_tier_breakdown<P: Borrow<Patient>>(patients: &[P]) -> RiskTierBreakdown {
    let mut counts = [0usize; 4];
    for patient in patients.iter().map(<P as Borrow<Patient>>::borrow) {
        counts[usize::from(patient.risk_tier.rank() - 1)] += 1;
    }

    let total = patients.len();
    RiskTierBreakdown {
        tier1_percent: percent_of(counts[0], total),
        tier2_percent: percent_of(counts[1], total),
        tier3_percent: percent_of(counts[2], total),
        tier4_percent: percent_of(counts[3], total),
    }
}

/// Counts how many patients carry each care-gap label.
///
/// A patient counts once per label even if the label is repeated on the record. Rows are
/// ordered by patient count (descending), then label. Only labels present in the input
/// appear.
pub fn compute_care_gap_summary<P: Borrow<Patient>>(patients: &[P]) -> Vec<CareGapCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for patient in patients.iter().map(<P as Borrow<Patient>>::borrow) {
        let labels: BTreeSet<&str> = patient.flagged_gaps.iter().map(String::as_str).collect();
        for label in labels {
            *counts.entry(label).or_default() += 1;
        }
    }

    let total = patients.len();
    let mut rows: Vec<CareGapCount> = counts
        .into_iter()
        .map(|(label, count)| CareGapCount {
            label: label.to_string(),
            patients: count,
            percent: percent_of(count, total),
        })
        .collect();
    // BTreeMap already yields labels in order; a stable sort keeps it for equal counts.
    rows.sort_by(|a, b| b.patients.cmp(&a.patients));
    rows
}
