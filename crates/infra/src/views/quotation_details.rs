//! Quotation detail page: header, lines with their margins, totals and the
//! margin gauge.

use serde::Serialize;

use crmdash_core::money::round_cents;
use crmdash_core::time::display_date;
use crmdash_core::{CompanyId, ProjectId, QuotationId};
use crmdash_parties::Company;
use crmdash_quotations::{Quotation, QuotationLine, QuotationStatus, StatusColor};

use super::fetch::fetch_quotation_with_company;
use super::widgets::Gauge;
use super::{QUOTATION_LOAD_FAILED, ViewState};
use crate::config::DashboardConfig;
use crate::crm::{CrmResult, CrmSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationHeader {
    pub id: QuotationId,
    pub number: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub expiry_date: Option<String>,
    pub last_update_date: Option<String>,
    pub status: QuotationStatus,
    pub status_color: StatusColor,
    pub company_id: CompanyId,
    pub company_name: String,
    pub manager_name: String,
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRow {
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub quantity: f64,
    pub price: f64,
    pub pre_tax_amount: f64,
    pub margin: f64,
    pub margin_percent: f64,
    pub unit_job_costing: f64,
    pub is_service: bool,
}

impl LineRow {
    fn new(line: &QuotationLine, service_prefix: &str) -> Self {
        Self {
            product_code: line.product_code.clone(),
            product_name: line.product_name.clone().or_else(|| line.title.clone()),
            quantity: line.quantity,
            price: line.price,
            pre_tax_amount: line.pre_tax_amount,
            margin: line.margin,
            margin_percent: round_cents(line.margin_percent()),
            unit_job_costing: line.unit_job_costing,
            is_service: line.is_service(service_prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationTotals {
    pub pre_tax_amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub margin: f64,
    pub margin_percent: f64,
    /// Unit job costing summed over the service lines.
    pub service_cost_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationLinks {
    pub public_path: Option<String>,
    pub customer_portal_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationDetails {
    pub header: QuotationHeader,
    pub lines: Vec<LineRow>,
    pub totals: QuotationTotals,
    pub gauge: Gauge,
    pub links: QuotationLinks,
    pub comments: Option<String>,
}

impl QuotationDetails {
    pub(crate) fn assemble(
        quotation: &Quotation,
        company: &Company,
        config: &DashboardConfig,
    ) -> Self {
        let prefix = config.service_code_prefix.as_str();
        Self {
            header: QuotationHeader {
                id: quotation.id,
                number: quotation.number.clone(),
                title: quotation.title.clone(),
                date: quotation.date.as_ref().map(display_date),
                expiry_date: quotation.expiry_date.as_ref().map(display_date),
                last_update_date: quotation.last_update_date.as_ref().map(display_date),
                status: quotation.status,
                status_color: quotation.status.color(),
                company_id: company.id,
                company_name: company.name.clone(),
                manager_name: company.manager_name().to_string(),
                project_id: quotation.project_id,
            },
            lines: quotation
                .quotation_lines
                .iter()
                .map(|line| LineRow::new(line, prefix))
                .collect(),
            totals: QuotationTotals {
                pre_tax_amount: quotation.pre_tax_amount,
                tax_amount: quotation.tax_amount,
                total_amount: quotation.total_amount,
                margin: quotation.margin,
                margin_percent: round_cents(quotation.margin_percent()),
                service_cost_total: quotation.service_cost_total(prefix),
            },
            gauge: Gauge::quotation(quotation.margin_ratio()),
            links: QuotationLinks {
                public_path: quotation.public_path.clone(),
                customer_portal_url: quotation.customer_portal_url.clone(),
            },
            comments: quotation.comments.clone(),
        }
    }
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    id: QuotationId,
) -> ViewState<QuotationDetails> {
    ViewState::from_result(build(source, config, id).await, QUOTATION_LOAD_FAILED)
}

async fn build(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    id: QuotationId,
) -> CrmResult<QuotationDetails> {
    let (quotation, company) = fetch_quotation_with_company(source, id).await?;
    Ok(QuotationDetails::assemble(&quotation, &company, config))
}

/// Details of an already loaded quotation; only its company is fetched.
pub async fn load_for(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    quotation: &Quotation,
) -> ViewState<QuotationDetails> {
    let result = source
        .company(quotation.company_id)
        .await
        .map(|company| QuotationDetails::assemble(quotation, &company, config));
    ViewState::from_result(result, QUOTATION_LOAD_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::{Endpoint, InMemoryCrm};
    use crate::views::fixtures;

    fn seeded() -> InMemoryCrm {
        let crm = InMemoryCrm::new();
        crm.insert_company(fixtures::company(7, "Acme"));
        crm.insert_quotation(fixtures::quotation(1, 7, Some(3)));
        crm
    }

    #[tokio::test]
    async fn details_with_lines_totals_and_gauge() {
        let crm = seeded();
        let view = load(&crm, &DashboardConfig::default(), QuotationId::new(1)).await;
        let details = view.data().unwrap();

        assert_eq!(details.header.company_name, "Acme");
        assert_eq!(details.header.manager_name, "Claire Martin");
        assert_eq!(details.header.status_color, StatusColor::Green);
        assert_eq!(details.header.date.as_deref(), Some("01/02/2024"));
        assert_eq!(details.lines.len(), 2);
        assert_eq!(details.lines[0].margin_percent, 37.5);
        assert!(details.lines[0].is_service);
        assert!(!details.lines[1].is_service);
        assert_eq!(details.totals.service_cost_total, 60.0);
        assert_eq!(details.totals.margin_percent, 25.0);
        assert_eq!(details.gauge.value, 0.25);
        assert!(details.links.public_path.is_some());
    }

    #[tokio::test]
    async fn service_prefix_comes_from_config() {
        let crm = seeded();
        let config = DashboardConfig {
            service_code_prefix: "BAIE".to_string(),
            ..DashboardConfig::default()
        };
        let view = load(&crm, &config, QuotationId::new(1)).await;
        assert_eq!(view.data().unwrap().totals.service_cost_total, 500.0);
    }

    #[tokio::test]
    async fn company_failure_fails_whole_view() {
        let crm = seeded();
        crm.fail(Endpoint::Company);

        let view = load(&crm, &DashboardConfig::default(), QuotationId::new(1)).await;
        assert_eq!(view, ViewState::Failed(QUOTATION_LOAD_FAILED.to_string()));
    }

    #[tokio::test]
    async fn load_for_skips_quotation_fetch() {
        let crm = seeded();
        let quotation = fixtures::quotation(1, 7, None);
        crm.fail(Endpoint::Quotation);

        let view = load_for(&crm, &DashboardConfig::default(), &quotation).await;
        assert!(view.is_ready());
    }
}
