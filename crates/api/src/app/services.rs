use std::sync::Arc;

use crmdash_infra::{CrmSource, Dashboard, DashboardConfig};

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Dashboard,
}

impl AppServices {
    pub fn new(source: Arc<dyn CrmSource>, config: DashboardConfig) -> Self {
        tracing::info!(
            quotations_page_size = config.quotations_page_size,
            projects_page_size = config.projects_page_size,
            companies_page_size = config.companies_page_size,
            "dashboard services ready"
        );
        Self {
            dashboard: Dashboard::new(source, config),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
