//! Quotation page with the details of the project it belongs to.
//!
//! The quotation is fetched once; its details and the project details are
//! then loaded concurrently and keep their own view states, so a failing
//! project does not hide the quotation.

use serde::Serialize;

use crmdash_core::QuotationId;

use super::project_details::{self, ProjectDetails};
use super::quotation_details::{self, QuotationDetails};
use super::{QUOTATION_LOAD_FAILED, ViewState};
use crate::config::DashboardConfig;
use crate::crm::CrmSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationWithProject {
    pub quotation: ViewState<QuotationDetails>,
    /// `None` when the quotation is not attached to a project.
    pub project: Option<ViewState<ProjectDetails>>,
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    id: QuotationId,
) -> ViewState<QuotationWithProject> {
    let quotation = match source.quotation(id).await {
        Ok(quotation) => quotation,
        Err(e) => return ViewState::from_result(Err(e), QUOTATION_LOAD_FAILED),
    };

    let details = quotation_details::load_for(source, config, &quotation);
    let view = match quotation.project_id {
        Some(project_id) => {
            let (details, project) =
                tokio::join!(details, project_details::load(source, config, project_id));
            QuotationWithProject {
                quotation: details,
                project: Some(project),
            }
        }
        None => QuotationWithProject {
            quotation: details.await,
            project: None,
        },
    };
    ViewState::Ready(view)
}
