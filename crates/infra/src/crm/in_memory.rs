//! In-memory CRM (dev/test).
//!
//! Holds records in maps and serves them through [`CrmSource`] with the same
//! paging and scoping rules as the HTTP client. Endpoints can be switched to
//! failing to exercise error paths.

use std::collections::{BTreeMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crmdash_core::{CompanyId, DateWindow, Page, ProjectId, QuotationId, Record};
use crmdash_parties::Company;
use crmdash_projects::Project;
use crmdash_purchasing::{Expense, SupplierContract};
use crmdash_quotations::Quotation;

use super::{CrmError, CrmResult, CrmSource, Endpoint, contract_in_scope, expense_in_scope};

/// Server page size of the CRM list endpoints.
pub const DEFAULT_SERVER_PAGE_SIZE: usize = 500;

#[derive(Debug, Default)]
struct Records {
    companies: BTreeMap<CompanyId, Company>,
    projects: BTreeMap<ProjectId, Project>,
    quotations: BTreeMap<QuotationId, Quotation>,
    expenses: Vec<Expense>,
    contracts: Vec<SupplierContract>,
}

#[derive(Debug)]
pub struct InMemoryCrm {
    records: RwLock<Records>,
    failing: RwLock<HashSet<Endpoint>>,
    server_page_size: usize,
}

impl Default for InMemoryCrm {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCrm {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::default()),
            failing: RwLock::new(HashSet::new()),
            server_page_size: DEFAULT_SERVER_PAGE_SIZE,
        }
    }

    pub fn with_server_page_size(mut self, size: usize) -> Self {
        self.server_page_size = size.max(1);
        self
    }

    pub fn insert_company(&self, company: Company) {
        if let Ok(mut records) = self.records.write() {
            records.companies.insert(company.id(), company);
        }
    }

    pub fn insert_project(&self, project: Project) {
        if let Ok(mut records) = self.records.write() {
            records.projects.insert(project.id(), project);
        }
    }

    pub fn insert_quotation(&self, quotation: Quotation) {
        if let Ok(mut records) = self.records.write() {
            records.quotations.insert(quotation.id(), quotation);
        }
    }

    pub fn insert_expense(&self, expense: Expense) {
        if let Ok(mut records) = self.records.write() {
            records.expenses.push(expense);
        }
    }

    pub fn insert_contract(&self, contract: SupplierContract) {
        if let Ok(mut records) = self.records.write() {
            records.contracts.push(contract);
        }
    }

    /// Make every call to `endpoint` fail with a 503.
    pub fn fail(&self, endpoint: Endpoint) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(endpoint);
        }
    }

    pub fn recover(&self, endpoint: Endpoint) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(&endpoint);
        }
    }

    fn check(&self, endpoint: Endpoint) -> CrmResult<()> {
        let failing = self
            .failing
            .read()
            .map(|failing| failing.contains(&endpoint))
            .unwrap_or(false);
        if failing {
            return Err(CrmError::Api {
                status: 503,
                body: format!("{endpoint} unavailable"),
            });
        }
        Ok(())
    }

    fn records(&self) -> CrmResult<RwLockReadGuard<'_, Records>> {
        self.records.read().map_err(|_| CrmError::Api {
            status: 500,
            body: "in-memory CRM lock poisoned".to_string(),
        })
    }

    fn page_of<T>(&self, items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
        let skip = (page.number() as usize - 1) * self.server_page_size;
        items.skip(skip).take(self.server_page_size).collect()
    }
}

fn lookup<T>(map: &BTreeMap<T::Id, T>, id: T::Id) -> CrmResult<T>
where
    T: Record + Clone,
    T::Id: Ord,
{
    map.get(&id)
        .cloned()
        .ok_or_else(|| CrmError::not_found(T::KIND, id))
}

#[async_trait]
impl CrmSource for InMemoryCrm {
    async fn company(&self, id: CompanyId) -> CrmResult<Company> {
        self.check(Endpoint::Company)?;
        lookup(&self.records()?.companies, id)
    }

    async fn companies(&self, page: Page) -> CrmResult<Vec<Company>> {
        self.check(Endpoint::Companies)?;
        let records = self.records()?;
        Ok(self.page_of(records.companies.values().cloned(), page))
    }

    async fn project(&self, id: ProjectId) -> CrmResult<Project> {
        self.check(Endpoint::Project)?;
        lookup(&self.records()?.projects, id)
    }

    async fn projects(&self, page: Page) -> CrmResult<Vec<Project>> {
        self.check(Endpoint::Projects)?;
        let records = self.records()?;
        Ok(self.page_of(records.projects.values().cloned(), page))
    }

    async fn quotation(&self, id: QuotationId) -> CrmResult<Quotation> {
        self.check(Endpoint::Quotation)?;
        lookup(&self.records()?.quotations, id)
    }

    async fn quotations(&self, page: Page) -> CrmResult<Vec<Quotation>> {
        self.check(Endpoint::Quotations)?;
        let records = self.records()?;
        Ok(self.page_of(records.quotations.values().cloned(), page))
    }

    async fn expenses(
        &self,
        window: &DateWindow,
        project_id: ProjectId,
    ) -> CrmResult<Vec<Expense>> {
        self.check(Endpoint::Expenses)?;
        let records = self.records()?;
        Ok(records
            .expenses
            .iter()
            .filter(|e| expense_in_scope(e, window, project_id))
            .cloned()
            .collect())
    }

    async fn supplier_contracts(
        &self,
        title_query: &str,
        date_start: DateTime<FixedOffset>,
    ) -> CrmResult<Vec<SupplierContract>> {
        self.check(Endpoint::SupplierContracts)?;
        let records = self.records()?;
        Ok(records
            .contracts
            .iter()
            .filter(|c| contract_in_scope(c, title_query, &date_start))
            .cloned()
            .collect())
    }
}
