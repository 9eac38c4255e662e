//! Plain-text rendering of dashboard views.

use std::fmt::Write;
use strata_core::{
    catalog::{FACILITIES, PROVIDERS, STATES},
    chart::{metric_cards, tier_slices},
    CareGapCount, DashboardSnapshot, Page, SortField, TableState,
};

const BAR_WIDTH: f64 = 40.0;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn bar(percent: f64) -> String {
    "#".repeat((percent / 100.0 * BAR_WIDTH).round() as usize)
}

pub fn summary(snapshot: &DashboardSnapshot<'_>) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Key Metrics ({})", snapshot.filters.date_range.label()));
    for card in metric_cards(&snapshot.metrics) {
        let _ = writeln!(out, "{:<24} {:>10}", card.title, card.value);
    }

    out.push('\n');
    heading(&mut out, "Risk Tier Distribution");
    for slice in tier_slices(&snapshot.breakdown) {
        let _ = writeln!(
            out,
            "{:<24} {:>6.1}%  {}",
            slice.name,
            slice.value,
            bar(slice.value)
        );
    }
    out
}

fn column_heading(field: SortField, table: &TableState) -> String {
    if field != table.sort_field {
        return field.heading().to_string();
    }
    let arrow = if table.sort_direction.is_descending() {
        "v"
    } else {
        "^"
    };
    format!("{} {arrow}", field.heading())
}

pub fn patient_table(page: &Page<'_>, table: &TableState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<20} {:>6} {:>11} {:>11} {:<15} Care Gaps",
        "ID",
        column_heading(SortField::Name, table),
        column_heading(SortField::Age, table),
        column_heading(SortField::HccScore, table),
        column_heading(SortField::RiskTier, table),
        column_heading(SortField::LastEdVisit, table),
    );

    if page.items.is_empty() {
        let _ = writeln!(out, "No patients match the current filters");
    }
    for patient in &page.items {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:>6} {:>11.2} {:>11} {:<15} {}",
            patient.id.as_str(),
            patient.name,
            patient.age,
            patient.hcc_score,
            patient.risk_tier.to_string(),
            patient.last_ed_visit.format("%b %-d, %Y").to_string(),
            patient.flagged_gaps.join(", ")
        );
    }

    let _ = writeln!(
        out,
        "\n{}  (page {} of {})",
        page.range_label(),
        page.page_number,
        page.total_pages.max(1)
    );
    out
}

pub fn care_gaps(rows: &[CareGapCount]) -> String {
    let mut out = String::new();
    heading(&mut out, "Care Gaps");
    if rows.is_empty() {
        let _ = writeln!(out, "No care gaps flagged");
    }
    for row in rows {
        let _ = writeln!(
            out,
            "{:<28} {:>5} {:>6.1}%",
            row.label, row.patients, row.percent
        );
    }
    out
}

pub fn catalog() -> String {
    let mut out = String::new();
    heading(&mut out, "Facilities");
    for facility in &FACILITIES {
        let _ = writeln!(out, "{:<30} {}", facility.name, facility.state);
    }
    out.push('\n');
    heading(&mut out, "States");
    let _ = writeln!(out, "{}", STATES.join(", "));
    out.push('\n');
    heading(&mut out, "Providers");
    for provider in &PROVIDERS {
        let _ = writeln!(out, "{}", provider.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use strata_core::{
        CoreConfig, DashboardService, DateRange, FilterSpecification, PatientRepository,
    };

    fn service() -> DashboardService {
        let cfg = Arc::new(CoreConfig::new(40, 10, Some(5)).unwrap());
        let repository = Arc::new(PatientRepository::from_config(&cfg, Utc::now()));
        DashboardService::new(cfg, repository)
    }

    #[test]
    fn test_summary_lists_cards_and_tiers() {
        let svc = service();
        let text = summary(&svc.snapshot(&FilterSpecification::default()));
        assert!(text.starts_with("Key Metrics (Last 30 Days)"));
        assert!(text.contains("Total Patients"));
        assert!(text.contains("Avg HCC Score"));
        assert!(text.contains("Tier 1 (Critical Risk)"));
        assert!(text.contains("Tier 4 (Low Risk)"));
    }

    #[test]
    fn test_table_marks_active_sort_column() {
        let svc = service();
        let spec = FilterSpecification::default().with_date_range(DateRange::Last90Days);
        let mut table = svc.table_state();
        table.toggle_sort(SortField::Age);
        table.toggle_sort(SortField::Age);
        let page = svc.table_page(&spec, &mut table);
        let text = patient_table(&page, &table);
        assert!(text.contains("Age v"));
        assert!(!text.contains("Risk Tier ^"));
        assert!(text.contains("Showing 1 to 10 of 40 patients"));
        assert!(text.contains("page 1 of 4"));
    }

    #[test]
    fn test_empty_table_shows_placeholder() {
        let svc = service();
        let spec = FilterSpecification::default().with_state(Some("WA".into()));
        let mut table = svc.table_state();
        let text = patient_table(&svc.table_page(&spec, &mut table), &table);
        assert!(text.contains("No patients match the current filters"));
        assert!(text.contains("Showing 0 to 0 of 0 patients"));
    }

    #[test]
    fn test_catalog_lists_every_state() {
        let text = catalog();
        for state in STATES {
            assert!(text.contains(state));
        }
        assert!(text.contains("Dr. Lisa Thompson"));
    }

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(100.0).len(), 40);
        assert_eq!(bar(25.0).len(), 10);
    }
}
