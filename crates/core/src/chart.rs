//! Chart and metric-card shaping.
//!
//! Turns aggregate values into the labelled, ordered records the dashboard widgets draw.

use crate::aggregate::{KeyMetrics, RiskTierBreakdown};
use serde::Serialize;
use strata_types::RiskTier;

/// One segment of the risk-tier chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSlice {
    pub tier: RiskTier,
    /// Legend name, e.g. "Tier 1 (Critical Risk)".
    pub name: String,
    /// Percentage of the filtered population.
    pub value: f64,
    pub color: &'static str,
    /// Composite-score band that assigns the tier.
    pub score_range: &'static str,
    pub description: &'static str,
}

impl TierSlice {
    /// Hover label, e.g. "Tier 2 (High Risk): 31.0%".
    pub fn label(&self) -> String {
        format!("{}: {:.1}%", self.name, self.value)
    }
}

pub fn tier_color(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "#EF5350",
        RiskTier::High => "#FF9800",
        RiskTier::Moderate => "#FDD835",
        RiskTier::Low => "#66BB6A",
    }
}

pub fn tier_score_range(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "80-100",
        RiskTier::High => "60-79",
        RiskTier::Moderate => "40-59",
        RiskTier::Low => "<40",
    }
}

pub fn tier_description(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => {
            "Patients with the highest complexity across clinical, cognitive, and social domains."
        }
        RiskTier::High => {
            "Patients with multiple risk factors that suggest moderate to high likelihood of adverse outcomes."
        }
        RiskTier::Moderate => {
            "Generally stable patients with some chronic conditions or social barriers but lower immediate risk."
        }
        RiskTier::Low => {
            "Low-acuity patients with stable health status and good functional ability."
        }
    }
}

/// The four chart slices in tier order.
pub fn tier_slices(breakdown: &RiskTierBreakdown) -> Vec<TierSlice> {
    RiskTier::ALL
        .into_iter()
        .map(|tier| TierSlice {
            tier,
            name: format!("{} ({})", tier, tier.label()),
            value: breakdown.percent(tier),
            color: tier_color(tier),
            score_range: tier_score_range(tier),
            description: tier_description(tier),
        })
        .collect()
}

/// A titled value on the key-metrics strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
}

/// Formats a count with comma thousands separators, e.g. `12,345`.
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn metric_cards(metrics: &KeyMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Total Patients",
            value: group_thousands(metrics.total_patients),
        },
        MetricCard {
            title: "% Dual Eligible",
            value: format!("{:.1}%", metrics.percent_dual_eligible),
        },
        MetricCard {
            title: "% Cognitive Impairment",
            value: format!("{:.1}%", metrics.percent_cognitive_impairment),
        },
        MetricCard {
            title: "Avg HCC Score",
            value: format!("{:.2}", metrics.avg_hcc_score),
        },
        MetricCard {
            title: "High Risk Patients",
            value: group_thousands(metrics.high_risk_patients),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_slices_follow_tier_order() {
        let breakdown = RiskTierBreakdown {
            tier1_percent: 40.0,
            tier2_percent: 30.0,
            tier3_percent: 20.0,
            tier4_percent: 10.0,
        };
        let slices = tier_slices(&breakdown);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].name, "Tier 1 (Critical Risk)");
        assert_eq!(slices[0].color, "#EF5350");
        assert_eq!(slices[3].name, "Tier 4 (Low Risk)");
        assert_eq!(slices[3].score_range, "<40");
        let values: Vec<_> = slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![40.0, 30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_slice_label_uses_one_decimal() {
        let slices = tier_slices(&RiskTierBreakdown {
            tier2_percent: 100.0 / 3.0,
            ..RiskTierBreakdown::default()
        });
        assert_eq!(slices[1].label(), "Tier 2 (High Risk): 33.3%");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_metric_cards_formatting() {
        let cards = metric_cards(&KeyMetrics {
            total_patients: 1_250,
            percent_dual_eligible: 40.0,
            percent_cognitive_impairment: 100.0 / 3.0,
            avg_hcc_score: 2.3456,
            high_risk_patients: 875,
        });
        let values: Vec<_> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["1,250", "40.0%", "33.3%", "2.35", "875"]);
        assert_eq!(cards[3].title, "Avg HCC Score");
    }

    #[test]
    fn test_metric_cards_for_empty_population() {
        let cards = metric_cards(&KeyMetrics::default());
        let values: Vec<_> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["0", "0.0%", "0.0%", "0.00", "0"]);
    }
}
