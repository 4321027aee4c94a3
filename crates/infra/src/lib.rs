//! Infrastructure layer: configuration, CRM access, page views.

pub mod config;
pub mod crm;
pub mod views;

pub use config::{AppConfig, ConfigError, CrmConfig, DashboardConfig};
pub use crm::{CrmError, CrmResult, CrmSource, HttpCrmClient, InMemoryCrm};
pub use views::{Dashboard, ViewState};
