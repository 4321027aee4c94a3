//! Page views: fetch chains turned into explicit view states.
//!
//! Each page of the dashboard is one module here. A view loads the records it
//! needs from a [`CrmSource`], builds a serializable view model, and reports
//! the outcome as a [`ViewState`]. Any failure along a fetch chain replaces the
//! whole view with a static message; the underlying error only goes to the
//! logs.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crmdash_core::{Page, ProjectId, QuotationId};

use crate::config::DashboardConfig;
use crate::crm::CrmSource;

pub mod company_list;
pub mod fetch;
pub mod project_details;
pub mod project_list;
pub mod quotation_details;
pub mod quotation_list;
pub mod quotation_with_project;
pub mod widgets;

#[cfg(test)]
pub(crate) mod fixtures;

pub const PROJECT_LOAD_FAILED: &str = "Failed to load project data.";
pub const QUOTATION_LOAD_FAILED: &str = "Failed to load quotation data.";
pub const QUOTATIONS_LOAD_FAILED: &str = "Failed to load quotations.";
pub const PROJECTS_LOAD_FAILED: &str = "Failed to load projects.";
pub const COMPANIES_LOAD_FAILED: &str = "Failed to load companies.";

/// State of one page view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    /// Resolve a fetch chain: `Ok` becomes `Ready`, `Err` is logged and
    /// replaced by the static `message`.
    pub fn from_result<E>(result: Result<T, E>, message: &str) -> Self
    where
        E: core::fmt::Display,
    {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                tracing::error!(error = %e, "{message}");
                ViewState::Failed(message.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(data) => ViewState::Ready(f(data)),
            ViewState::Failed(message) => ViewState::Failed(message),
        }
    }
}

impl<T: Serialize> Serialize for ViewState<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ViewState", 2)?;
        match self {
            ViewState::Loading => {
                state.serialize_field("state", "loading")?;
            }
            ViewState::Ready(data) => {
                state.serialize_field("state", "ready")?;
                state.serialize_field("data", data)?;
            }
            ViewState::Failed(message) => {
                state.serialize_field("state", "failed")?;
                state.serialize_field("message", message)?;
            }
        }
        state.end()
    }
}

/// Navigation between list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Pagination {
    pub page: Page,
    pub previous_page: Option<Page>,
    pub next_page: Page,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page: Page, page_size: usize) -> Self {
        Self {
            page,
            previous_page: page.previous(),
            next_page: page.next(),
            page_size,
        }
    }
}

/// Keep the first `page_size` items of a server page.
pub(crate) fn truncate_page<T>(mut items: Vec<T>, page_size: usize) -> Vec<T> {
    items.truncate(page_size);
    items
}

/// Entry point of the page views, bound to one CRM source.
#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn CrmSource>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(source: Arc<dyn CrmSource>, config: DashboardConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn company_list(&self, page: Page) -> ViewState<company_list::CompanyList> {
        company_list::load(self.source.as_ref(), &self.config, page).await
    }

    pub async fn project_list(&self, page: Page) -> ViewState<project_list::ProjectList> {
        project_list::load(self.source.as_ref(), &self.config, page).await
    }

    pub async fn project_details(
        &self,
        id: ProjectId,
    ) -> ViewState<project_details::ProjectDetails> {
        project_details::load(self.source.as_ref(), &self.config, id).await
    }

    pub async fn quotation_list(&self, page: Page) -> ViewState<quotation_list::QuotationList> {
        quotation_list::load(self.source.as_ref(), &self.config, page).await
    }

    pub async fn quotation_details(
        &self,
        id: QuotationId,
    ) -> ViewState<quotation_details::QuotationDetails> {
        quotation_details::load(self.source.as_ref(), &self.config, id).await
    }

    pub async fn quotation_with_project(
        &self,
        id: QuotationId,
    ) -> ViewState<quotation_with_project::QuotationWithProject> {
        quotation_with_project::load(self.source.as_ref(), &self.config, id).await
    }
}
