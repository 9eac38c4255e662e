//! Dashboard service.
//!
//! Ties the repository, filter engine and aggregation engine together. Every output is
//! derived from one borrowed [`FilterSpecification`], so metrics, breakdown and table rows
//! can never disagree about which filters were applied.

use crate::aggregate::{
    compute_care_gap_summary, compute_key_metrics, compute_risk_tier_breakdown, CareGapCount,
    KeyMetrics, RiskTierBreakdown,
};
use crate::filter::{select_patients, FilterSpecification};
use crate::table::{Page, TableState};
use crate::{CoreConfig, Patient, PatientRepository};
use serde::Serialize;
use std::sync::Arc;

/// The consistent (metrics, breakdown, patients) triple for one filter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot<'a> {
    pub filters: FilterSpecification,
    pub metrics: KeyMetrics,
    pub breakdown: RiskTierBreakdown,
    pub patients: Vec<&'a Patient>,
}

/// Read-only dashboard operations over a shared repository.
#[derive(Clone, Debug)]
pub struct DashboardService {
    cfg: Arc<CoreConfig>,
    repository: Arc<PatientRepository>,
}

impl DashboardService {
    pub fn new(cfg: Arc<CoreConfig>, repository: Arc<PatientRepository>) -> Self {
        Self { cfg, repository }
    }

    pub fn repository(&self) -> &PatientRepository {
        &self.repository
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Filtered patients for `spec`.
    pub fn patients(&self, spec: &FilterSpecification) -> Vec<&Patient> {
        select_patients(self.repository.patients(), spec)
    }

    /// Derives all dashboard outputs from the single snapshot `spec`.
    pub fn snapshot(&self, spec: &FilterSpecification) -> DashboardSnapshot<'_> {
        let patients = self.patients(spec);
        let metrics = compute_key_metrics(&patients);
        let breakdown = compute_risk_tier_breakdown(&patients);

        tracing::debug!(
            selected = patients.len(),
            high_risk = metrics.high_risk_patients,
            "built dashboard snapshot"
        );

        DashboardSnapshot {
            filters: spec.clone(),
            metrics,
            breakdown,
            patients,
        }
    }

    /// A table state sized by the configured page size.
    pub fn table_state(&self) -> TableState {
        TableState::new(self.cfg.page_size())
    }

    /// Renders the table page for `spec`, clamping `table.page` in place.
    pub fn table_page(&self, spec: &FilterSpecification, table: &mut TableState) -> Page<'_> {
        table.view(self.patients(spec))
    }

    /// Care-gap tally for the patients selected by `spec`.
    pub fn care_gaps(&self, spec: &FilterSpecification) -> Vec<CareGapCount> {
        compute_care_gap_summary(&self.patients(spec))
    }
}
