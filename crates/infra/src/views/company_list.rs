use serde::Serialize;

use crmdash_core::{CompanyId, Page};
use crmdash_parties::{Company, PartyKind};

use super::{COMPANIES_LOAD_FAILED, Pagination, ViewState, truncate_page};
use crate::config::DashboardConfig;
use crate::crm::CrmSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    pub id: CompanyId,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub manager_name: String,
    pub kinds: Vec<PartyKind>,
}

impl From<&Company> for CompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            city: company.address_city.clone(),
            country: company.address_country.clone(),
            manager_name: company.manager_name().to_string(),
            kinds: company.kinds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyList {
    pub rows: Vec<CompanyRow>,
    pub pagination: Pagination,
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    page: Page,
) -> ViewState<CompanyList> {
    let result = source.companies(page).await.map(|companies| {
        let companies = truncate_page(companies, config.companies_page_size);
        CompanyList {
            rows: companies.iter().map(CompanyRow::from).collect(),
            pagination: Pagination::new(page, config.companies_page_size),
        }
    });
    ViewState::from_result(result, COMPANIES_LOAD_FAILED)
}
