//! Project detail page.
//!
//! Loads the project and its company, then the project's supplier contracts
//! and expenses, and reconciles the two. The page shows the project header,
//! a company card, the margin chart and gauge, one table of expenses and one
//! of contracts (each contract flagged when an expense already covers it).

use serde::Serialize;

use crmdash_core::time::display_date;
use crmdash_core::{CompanyId, ExpenseId, ProjectId, SupplierContractId};
use crmdash_parties::{Address, Company};
use crmdash_projects::{Project, ProjectFinancials};
use crmdash_purchasing::{
    Expense, ExpenseLine, ExpenseTotals, ReconciledContract, SupplierContract, reconcile_contracts,
};

use super::fetch::{fetch_project_with_company, fetch_reconciliation_inputs};
use super::widgets::{ChartBar, Gauge, project_chart};
use super::{PROJECT_LOAD_FAILED, ViewState};
use crate::config::DashboardConfig;
use crate::crm::{CrmResult, CrmSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHeader {
    pub id: ProjectId,
    pub number: Option<String>,
    pub name: Option<String>,
    pub estimated_start: Option<String>,
    pub estimated_end: Option<String>,
    pub actual_start: Option<String>,
    pub actual_end: Option<String>,
}

impl From<&Project> for ProjectHeader {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            number: project.number.clone(),
            name: project.name.clone(),
            estimated_start: project.estimated_start.as_ref().map(display_date),
            estimated_end: project.estimated_end.as_ref().map(display_date),
            actual_start: project.actual_start.as_ref().map(display_date),
            actual_end: project.actual_end.as_ref().map(display_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCard {
    pub id: CompanyId,
    pub name: String,
    pub address: Address,
    pub locality: String,
    pub manager_name: String,
}

impl From<&Company> for CompanyCard {
    fn from(company: &Company) -> Self {
        let address = company.address();
        Self {
            id: company.id,
            name: company.name.clone(),
            locality: address.locality(),
            address,
            manager_name: company.manager_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub title: Option<String>,
    pub date: Option<String>,
    pub supplier_name: Option<String>,
    pub accounting_code_name: Option<String>,
    pub pre_tax_amount: f64,
    pub total_amount: f64,
    pub left_to_pay: f64,
    pub public_path: Option<String>,
    pub lines: Vec<ExpenseLine>,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            date: expense.date.as_ref().map(display_date),
            supplier_name: expense.supplier_name.clone(),
            accounting_code_name: expense.accounting_code_name.clone(),
            pre_tax_amount: expense.pre_tax_amount,
            total_amount: expense.total_amount,
            left_to_pay: expense.left_to_pay,
            public_path: expense.public_path.clone(),
            lines: expense.expense_lines.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRow {
    pub id: SupplierContractId,
    pub title: String,
    pub supplier_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub pre_tax_amount: f64,
    pub total_amount: f64,
    pub has_expense: bool,
    pub expense_ids: Vec<ExpenseId>,
    /// Plain text; the CRM stores contract comments as HTML.
    pub comment_preview: String,
}

impl ContractRow {
    fn new(reconciled: &ReconciledContract, preview_len: usize) -> Self {
        let contract: &SupplierContract = &reconciled.contract;
        Self {
            id: contract.id,
            title: contract.title.clone(),
            supplier_name: contract.supplier_name().map(str::to_string),
            start_date: contract.start_date.as_ref().map(display_date),
            end_date: contract.end_date.as_ref().map(display_date),
            pre_tax_amount: contract.pre_tax_amount,
            total_amount: contract.total_amount,
            has_expense: reconciled.has_expense,
            expense_ids: contract.expense_ids().collect(),
            comment_preview: contract.comment_preview(preview_len),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetails {
    pub header: ProjectHeader,
    pub company: CompanyCard,
    pub financials: ProjectFinancials,
    pub chart: Vec<ChartBar>,
    pub gauge: Gauge,
    pub expenses: Vec<ExpenseRow>,
    pub contracts: Vec<ContractRow>,
    pub totals: ExpenseTotals,
    /// Σ pre-tax amount of the contracts no expense covers yet.
    pub unexpensed_contract_total: f64,
    /// The project has no name or estimated start, so contracts and expenses were not looked up.
    pub reconciliation_skipped: bool,
}

impl ProjectDetails {
    fn assemble(
        project: &Project,
        company: &Company,
        contracts: Vec<SupplierContract>,
        expenses: Vec<Expense>,
        reconciliation_skipped: bool,
        config: &DashboardConfig,
    ) -> Self {
        let financials = ProjectFinancials::from_project(project);
        let reconciliation = reconcile_contracts(&expenses, contracts);

        Self {
            header: ProjectHeader::from(project),
            company: CompanyCard::from(company),
            chart: project_chart(&financials, reconciliation.unexpensed_contract_total),
            gauge: Gauge::project(&financials),
            financials,
            totals: ExpenseTotals::from_expenses(&expenses),
            expenses: expenses.iter().map(ExpenseRow::from).collect(),
            contracts: reconciliation
                .contracts
                .iter()
                .map(|c| ContractRow::new(c, config.comment_preview_len))
                .collect(),
            unexpensed_contract_total: reconciliation.unexpensed_contract_total,
            reconciliation_skipped,
        }
    }
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    id: ProjectId,
) -> ViewState<ProjectDetails> {
    ViewState::from_result(build(source, config, id).await, PROJECT_LOAD_FAILED)
}

async fn build(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    id: ProjectId,
) -> CrmResult<ProjectDetails> {
    let (project, company) = fetch_project_with_company(source, id).await?;

    let (contracts, expenses, skipped) = match project.reconciliation_scope() {
        Some(scope) => {
            let (contracts, expenses) = fetch_reconciliation_inputs(source, &scope).await?;
            (contracts, expenses, false)
        }
        None => {
            tracing::warn!(
                project_id = %project.id,
                "project has no name or estimated start, skipping contracts and expenses"
            );
            (Vec::new(), Vec::new(), true)
        }
    };

    Ok(ProjectDetails::assemble(&project, &company, contracts, expenses, skipped, config))
}
