//! Figures derived from a project record alone.

use serde::Serialize;

use crmdash_core::money::safe_ratio;

use crate::project::Project;

/// Revenue, cost and margin of a project.
///
/// `margin_ratio` is `0.0` when the project has no actual revenue;
/// `margin_ratio_available` lets a renderer print "N/A" instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectFinancials {
    pub estimated_revenue: f64,
    pub actual_revenue: f64,
    pub actual_expenses_cost: f64,
    pub net_margin: f64,
    pub margin_ratio: f64,
    pub margin_ratio_available: bool,
}

impl ProjectFinancials {
    pub fn from_project(project: &Project) -> Self {
        let net_margin = project.actual_revenue - project.actual_expenses_cost;
        let margin_ratio = safe_ratio(net_margin, project.actual_revenue);
        Self {
            estimated_revenue: project.estimated_revenue,
            actual_revenue: project.actual_revenue,
            actual_expenses_cost: project.actual_expenses_cost,
            net_margin,
            margin_ratio,
            margin_ratio_available: project.actual_revenue != 0.0 && margin_ratio.is_finite(),
        }
    }

    /// Margin ratio clamped into the gauge range `[0, 1]`.
    pub fn gauge_value(&self) -> f64 {
        self.margin_ratio.clamp(0.0, 1.0)
    }
}
