use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crmdash_core::{CompanyId, DateWindow, ProjectId, Record};

/// A project record as served by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub company_id: CompanyId,
    #[serde(default)]
    pub estimated_start: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub estimated_end: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub actual_start: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub actual_end: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub estimated_revenue: f64,
    #[serde(default)]
    pub actual_revenue: f64,
    #[serde(default)]
    pub actual_expenses_cost: f64,
}

/// What is needed to look up a project's supplier contracts and expenses.
///
/// Contracts are matched on the project name from the estimated start;
/// expenses on the estimated window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationScope {
    pub project_id: ProjectId,
    pub title_query: String,
    pub window: DateWindow,
}

impl Project {
    /// `None` when the project lacks a name or an estimated start.
    pub fn reconciliation_scope(&self) -> Option<ReconciliationScope> {
        let title_query = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let start = self.estimated_start?;
        Some(ReconciliationScope {
            project_id: self.id,
            title_query: title_query.to_string(),
            window: DateWindow::new(start, self.estimated_end),
        })
    }
}

impl Record for Project {
    type Id = ProjectId;
    const KIND: &'static str = "project";

    fn id(&self) -> ProjectId {
        self.id
    }
}
