//! Chart and gauge models handed to the renderer.

use serde::Serialize;

use crmdash_projects::ProjectFinancials;

/// One bar of the project chart; stacked when it has several segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub key: &'static str,
    pub label: &'static str,
    pub segments: Vec<ChartSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub key: &'static str,
    pub value: f64,
}

impl ChartBar {
    fn single(key: &'static str, label: &'static str, value: f64) -> Self {
        Self {
            key,
            label,
            segments: vec![ChartSegment { key, value }],
        }
    }

    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}

/// Order, receipts, stacked expenses (paid / upcoming) and net margin.
pub fn project_chart(
    financials: &ProjectFinancials,
    unexpensed_contract_total: f64,
) -> Vec<ChartBar> {
    vec![
        ChartBar::single("order", "Order", financials.estimated_revenue),
        ChartBar::single("receipts", "Receipts", financials.actual_revenue),
        ChartBar {
            key: "expenses",
            label: "Expenses",
            segments: vec![
                ChartSegment {
                    key: "paid",
                    value: financials.actual_expenses_cost,
                },
                ChartSegment {
                    key: "upcoming",
                    value: unexpensed_contract_total,
                },
            ],
        },
        ChartBar::single("net_margin", "Net margin", financials.net_margin),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeArc {
    pub length: f64,
    pub color: &'static str,
}

/// Radial gauge over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub arcs: Vec<GaugeArc>,
}

const PROJECT_ARCS: [(f64, &str); 4] = [
    (0.15, "#EA4228"),
    (0.10, "#F5CD19"),
    (0.30, "#5BE12C"),
    (0.45, "#109f30"),
];

const QUOTATION_ARCS: [(f64, &str); 2] = [(0.5, "#f78800"), (0.5, "#109f00")];

impl Gauge {
    fn new(value: f64, arcs: &[(f64, &'static str)]) -> Self {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            value,
            arcs: arcs
                .iter()
                .map(|&(length, color)| GaugeArc { length, color })
                .collect(),
        }
    }

    /// Project margin gauge: red, yellow, green, dark green.
    pub fn project(financials: &ProjectFinancials) -> Self {
        Self::new(financials.gauge_value(), &PROJECT_ARCS)
    }

    /// Quotation margin gauge: orange below half, green above.
    pub fn quotation(margin_ratio: f64) -> Self {
        Self::new(margin_ratio, &QUOTATION_ARCS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn financials(actual_revenue: f64, actual_expenses_cost: f64) -> ProjectFinancials {
        let net_margin = actual_revenue - actual_expenses_cost;
        ProjectFinancials {
            estimated_revenue: 1500.0,
            actual_revenue,
            actual_expenses_cost,
            net_margin,
            margin_ratio: crmdash_core::money::safe_ratio(net_margin, actual_revenue),
            margin_ratio_available: actual_revenue != 0.0,
        }
    }

    #[test]
    fn chart_series_are_ordered_and_expenses_stacked() {
        let chart = project_chart(&financials(1000.0, 400.0), 250.0);
        let keys: Vec<_> = chart.iter().map(|b| b.key).collect();
        assert_eq!(keys, ["order", "receipts", "expenses", "net_margin"]);
        assert_eq!(chart[2].segments.len(), 2);
        assert_eq!(chart[2].segments[0].value, 400.0);
        assert_eq!(chart[2].segments[1].value, 250.0);
        assert_eq!(chart[2].total(), 650.0);
        assert_eq!(chart[3].total(), 600.0);
    }

    #[test]
    fn project_gauge_is_clamped() {
        let loss = Gauge::project(&financials(100.0, 400.0));
        assert_eq!(loss.value, 0.0);
        let arcs: f64 = loss.arcs.iter().map(|a| a.length).sum();
        assert!((arcs - 1.0).abs() < 1e-12);
        assert_eq!(loss.arcs[0].color, "#EA4228");

        assert_eq!(Gauge::project(&financials(1000.0, 400.0)).value, 0.6);
    }

    #[test]
    fn quotation_gauge_ignores_non_finite_ratio() {
        assert_eq!(Gauge::quotation(f64::NAN).value, 0.0);
        assert_eq!(Gauge::quotation(1.7).value, 1.0);
        assert_eq!(Gauge::quotation(0.25).arcs.len(), 2);
    }
}
