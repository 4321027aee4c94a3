//! Read access to the CRM.
//!
//! Views only ever talk to [`CrmSource`]. Two implementations exist:
//! [`HttpCrmClient`] for the real API and [`InMemoryCrm`] for tests and
//! local development. Both apply the same scoping rules for expenses and
//! supplier contracts (see [`expense_in_scope`] and [`contract_in_scope`]).

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crmdash_core::{CompanyId, DateWindow, Page, ProjectId, QuotationId};
use crmdash_parties::Company;
use crmdash_projects::Project;
use crmdash_purchasing::{Expense, SupplierContract};
use crmdash_quotations::Quotation;

pub mod http;
pub mod in_memory;

pub use http::HttpCrmClient;
pub use in_memory::InMemoryCrm;

pub type CrmResult<T> = Result<T, CrmError>;

/// Failure while reading from the CRM.
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("CRM API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode CRM response from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl CrmError {
    pub fn not_found(entity: &'static str, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// The CRM read endpoints this dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Company,
    Companies,
    Project,
    Projects,
    Quotation,
    Quotations,
    Expenses,
    SupplierContracts,
}

impl Endpoint {
    /// Collection path below the API base URL.
    pub fn collection(&self) -> &'static str {
        match self {
            Endpoint::Company | Endpoint::Companies => "companies",
            Endpoint::Project | Endpoint::Projects => "projects",
            Endpoint::Quotation | Endpoint::Quotations => "quotations",
            Endpoint::Expenses => "expenses",
            Endpoint::SupplierContracts => "supplier-contracts",
        }
    }
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Endpoint::Company => "company",
            Endpoint::Companies => "companies",
            Endpoint::Project => "project",
            Endpoint::Projects => "projects",
            Endpoint::Quotation => "quotation",
            Endpoint::Quotations => "quotations",
            Endpoint::Expenses => "expenses",
            Endpoint::SupplierContracts => "supplier contracts",
        };
        f.write_str(name)
    }
}

/// Read-only CRM access used by the page views.
///
/// List endpoints return a whole server page; trimming to the displayed page
/// size is the view's job.
#[async_trait]
pub trait CrmSource: Send + Sync {
    async fn company(&self, id: CompanyId) -> CrmResult<Company>;

    async fn companies(&self, page: Page) -> CrmResult<Vec<Company>>;

    async fn project(&self, id: ProjectId) -> CrmResult<Project>;

    async fn projects(&self, page: Page) -> CrmResult<Vec<Project>>;

    async fn quotation(&self, id: QuotationId) -> CrmResult<Quotation>;

    async fn quotations(&self, page: Page) -> CrmResult<Vec<Quotation>>;

    /// Expenses of `project_id` dated inside `window`.
    async fn expenses(&self, window: &DateWindow, project_id: ProjectId) -> CrmResult<Vec<Expense>>;

    /// Supplier contracts whose title contains `title_query`, starting on or
    /// after `date_start`.
    async fn supplier_contracts(
        &self,
        title_query: &str,
        date_start: DateTime<FixedOffset>,
    ) -> CrmResult<Vec<SupplierContract>>;
}

/// Expense scoping: same project, dated inside the window (undated expenses are kept).
pub fn expense_in_scope(expense: &Expense, window: &DateWindow, project_id: ProjectId) -> bool {
    expense.project_id == Some(project_id) && expense.date.is_none_or(|d| window.contains(&d))
}

/// Contract scoping: title contains the query, starting on or after `date_start`
/// (contracts without a start date are kept).
pub fn contract_in_scope(
    contract: &SupplierContract,
    title_query: &str,
    date_start: &DateTime<FixedOffset>,
) -> bool {
    contract.title_matches(title_query)
        && contract
            .start_date
            .is_none_or(|d| d.date_naive() >= date_start.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn expense(project: Option<u64>, date: Option<&str>) -> Expense {
        let mut json = serde_json::json!({ "id": 1 });
        if let Some(p) = project {
            json["project_id"] = p.into();
        }
        if let Some(d) = date {
            json["date"] = d.into();
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn expense_scope_checks_project_and_window() {
        let window = DateWindow::new(
            at("2024-01-01T00:00:00+01:00"),
            Some(at("2024-06-30T00:00:00+02:00")),
        );
        let project = ProjectId::new(5);

        let march = Some("2024-03-01T00:00:00+01:00");
        let august = Some("2024-08-01T00:00:00+02:00");

        assert!(expense_in_scope(&expense(Some(5), march), &window, project));
        assert!(expense_in_scope(&expense(Some(5), None), &window, project));
        assert!(!expense_in_scope(&expense(Some(6), march), &window, project));
        assert!(!expense_in_scope(&expense(None, None), &window, project));
        assert!(!expense_in_scope(&expense(Some(5), august), &window, project));
    }

    #[test]
    fn contract_scope_checks_title_and_start() {
        let contract: SupplierContract = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Site Lyon - baies",
            "start_date": "2024-02-01T00:00:00+01:00"
        }))
        .unwrap();

        assert!(contract_in_scope(&contract, "site lyon", &at("2024-01-01T00:00:00+01:00")));
        assert!(contract_in_scope(&contract, "Site Lyon", &at("2024-02-01T10:00:00+01:00")));
        assert!(!contract_in_scope(&contract, "Site Lyon", &at("2024-03-01T00:00:00+01:00")));
        assert!(!contract_in_scope(&contract, "Site Paris", &at("2024-01-01T00:00:00+01:00")));
    }

    #[test]
    fn endpoints_map_to_collections() {
        assert_eq!(Endpoint::SupplierContracts.collection(), "supplier-contracts");
        assert_eq!(Endpoint::Quotation.collection(), Endpoint::Quotations.collection());
        assert_eq!(Endpoint::SupplierContracts.to_string(), "supplier contracts");
    }
}
