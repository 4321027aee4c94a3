use serde::Serialize;

use crmdash_core::money::round_cents;
use crmdash_core::time::display_date;
use crmdash_core::{CompanyId, Page, QuotationId};
use crmdash_quotations::{Quotation, QuotationStatus, StatusColor};

use super::{Pagination, QUOTATIONS_LOAD_FAILED, ViewState, truncate_page};
use crate::config::DashboardConfig;
use crate::crm::CrmSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationRow {
    pub id: QuotationId,
    pub number: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub company_id: CompanyId,
    pub company_name: Option<String>,
    pub status: QuotationStatus,
    pub status_color: StatusColor,
    pub pre_tax_amount: f64,
    pub total_amount: f64,
    pub margin: f64,
    /// Rounded to cents for display.
    pub margin_percent: f64,
    pub has_project: bool,
}

impl From<&Quotation> for QuotationRow {
    fn from(q: &Quotation) -> Self {
        Self {
            id: q.id,
            number: q.number.clone(),
            title: q.title.clone(),
            date: q.date.as_ref().map(display_date),
            company_id: q.company_id,
            company_name: q.company_name.clone(),
            status: q.status,
            status_color: q.status.color(),
            pre_tax_amount: q.pre_tax_amount,
            total_amount: q.total_amount,
            margin: q.margin,
            margin_percent: round_cents(q.margin_percent()),
            has_project: q.project_id.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationList {
    pub rows: Vec<QuotationRow>,
    pub pagination: Pagination,
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    page: Page,
) -> ViewState<QuotationList> {
    let result = source.quotations(page).await.map(|quotations| {
        let quotations = truncate_page(quotations, config.quotations_page_size);
        QuotationList {
            rows: quotations.iter().map(QuotationRow::from).collect(),
            pagination: Pagination::new(page, config.quotations_page_size),
        }
    });
    ViewState::from_result(result, QUOTATIONS_LOAD_FAILED)
}
