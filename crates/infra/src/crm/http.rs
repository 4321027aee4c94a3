//! HTTP client for the CRM REST API.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;

use crmdash_core::{CompanyId, DateWindow, Page, ProjectId, QuotationId};
use crmdash_parties::Company;
use crmdash_projects::Project;
use crmdash_purchasing::{Expense, SupplierContract};
use crmdash_quotations::Quotation;

use super::{CrmError, CrmResult, CrmSource, Endpoint, contract_in_scope, expense_in_scope};
use crate::config::CrmConfig;

/// Header carrying the CRM API key.
pub const API_KEY_HEADER: &str = "userApiKey";
/// Header selecting the server page on list endpoints.
pub const PAGE_HEADER: &str = "page";

/// Date format of the CRM query parameters.
const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

/// CRM client over HTTP.
///
/// Holds one `reqwest::Client`, so connections are pooled across views.
#[derive(Debug, Clone)]
pub struct HttpCrmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCrmClient {
    pub fn new(config: &CrmConfig) -> CrmResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CrmError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_one<T>(&self, endpoint: Endpoint, entity: &'static str, id: u64) -> CrmResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base_url, endpoint.collection(), id);
        let req = self.client.get(&url);
        match self.send(endpoint, req).await {
            Err(CrmError::Api { status: 404, .. }) => Err(CrmError::not_found(entity, id)),
            other => other,
        }
    }

    async fn get_list<T>(
        &self,
        endpoint: Endpoint,
        page: Option<Page>,
        query: &[(&str, String)],
    ) -> CrmResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint.collection());
        let mut req = self.client.get(&url).query(query);
        if let Some(page) = page {
            req = req.header(PAGE_HEADER, page.number().to_string());
        }
        self.send(endpoint, req).await
    }

    async fn send<T>(&self, endpoint: Endpoint, req: reqwest::RequestBuilder) -> CrmResult<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(%endpoint, "fetching from CRM");

        let resp = req
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| CrmError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%endpoint, status = status.as_u16(), "CRM request failed");
            return Err(CrmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CrmError::Network(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| CrmError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

fn query_date(at: &DateTime<FixedOffset>) -> String {
    at.format(QUERY_DATE_FORMAT).to_string()
}

#[async_trait]
impl CrmSource for HttpCrmClient {
    async fn company(&self, id: CompanyId) -> CrmResult<Company> {
        self.get_one(Endpoint::Company, "company", id.get()).await
    }

    async fn companies(&self, page: Page) -> CrmResult<Vec<Company>> {
        self.get_list(Endpoint::Companies, Some(page), &[]).await
    }

    async fn project(&self, id: ProjectId) -> CrmResult<Project> {
        self.get_one(Endpoint::Project, "project", id.get()).await
    }

    async fn projects(&self, page: Page) -> CrmResult<Vec<Project>> {
        self.get_list(Endpoint::Projects, Some(page), &[]).await
    }

    async fn quotation(&self, id: QuotationId) -> CrmResult<Quotation> {
        self.get_one(Endpoint::Quotation, "quotation", id.get()).await
    }

    async fn quotations(&self, page: Page) -> CrmResult<Vec<Quotation>> {
        self.get_list(Endpoint::Quotations, Some(page), &[]).await
    }

    async fn expenses(
        &self,
        window: &DateWindow,
        project_id: ProjectId,
    ) -> CrmResult<Vec<Expense>> {
        let mut query = vec![("date_after", query_date(&window.start))];
        if let Some(end) = &window.end {
            query.push(("date_before", query_date(end)));
        }

        let expenses: Vec<Expense> = self.get_list(Endpoint::Expenses, None, &query).await?;
        Ok(expenses
            .into_iter()
            .filter(|e| expense_in_scope(e, window, project_id))
            .collect())
    }

    async fn supplier_contracts(
        &self,
        title_query: &str,
        date_start: DateTime<FixedOffset>,
    ) -> CrmResult<Vec<SupplierContract>> {
        let query = [("date_after", query_date(&date_start))];

        let contracts: Vec<SupplierContract> =
            self.get_list(Endpoint::SupplierContracts, None, &query).await?;
        Ok(contracts
            .into_iter()
            .filter(|c| contract_in_scope(c, title_query, &date_start))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn query_dates_use_day_first_format() {
        let at = DateTime::parse_from_rfc3339("2024-01-05T00:00:00+01:00").unwrap();
        assert_eq!(query_date(&at), "05/01/2024");
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = HttpCrmClient::new(&CrmConfig {
            base_url: "http://localhost:1/api/v2/".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1/api/v2");
    }
}
