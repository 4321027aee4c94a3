use serde::Serialize;

use crmdash_core::{CompanyId, Page, ProjectId};
use crmdash_projects::{Project, ProjectFinancials};

use super::{PROJECTS_LOAD_FAILED, Pagination, ViewState, truncate_page};
use crate::config::DashboardConfig;
use crate::crm::CrmSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub number: Option<String>,
    pub name: Option<String>,
    pub company_id: CompanyId,
    #[serde(flatten)]
    pub financials: ProjectFinancials,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            number: project.number.clone(),
            name: project.name.clone(),
            company_id: project.company_id,
            financials: ProjectFinancials::from_project(project),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectList {
    pub rows: Vec<ProjectRow>,
    pub pagination: Pagination,
}

pub async fn load(
    source: &dyn CrmSource,
    config: &DashboardConfig,
    page: Page,
) -> ViewState<ProjectList> {
    let result = source.projects(page).await.map(|projects| {
        let projects = truncate_page(projects, config.projects_page_size);
        ProjectList {
            rows: projects.iter().map(ProjectRow::from).collect(),
            pagination: Pagination::new(page, config.projects_page_size),
        }
    });
    ViewState::from_result(result, PROJECTS_LOAD_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::{Endpoint, InMemoryCrm};
    use crate::views::fixtures;

    #[tokio::test]
    async fn rows_carry_margin_figures() {
        let crm = InMemoryCrm::new();
        crm.insert_project(fixtures::project(1, 7, Some("Site Lyon")));

        let view = load(&crm, &DashboardConfig::default(), Page::FIRST).await;
        let row = &view.data().unwrap().rows[0];
        assert_eq!(row.financials.net_margin, 600.0);
        assert!((row.financials.margin_ratio - 0.6).abs() < 1e-12);

        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["net_margin"], 600.0);
        assert_eq!(json["company_id"], 7);
    }

    #[tokio::test]
    async fn second_page_reports_previous_page() {
        let crm = InMemoryCrm::new().with_server_page_size(2);
        for id in 1..=3 {
            crm.insert_project(fixtures::project(id, 7, None));
        }

        let config = DashboardConfig {
            projects_page_size: 1,
            ..DashboardConfig::default()
        };
        let view = load(&crm, &config, Page::new(2).unwrap()).await;
        let list = view.data().unwrap();
        assert_eq!(list.rows.len(), 1);
        assert_eq!(list.rows[0].id, ProjectId::new(3));
        assert_eq!(list.pagination.previous_page, Some(Page::FIRST));
        assert_eq!(list.pagination.next_page.number(), 3);
    }

    #[tokio::test]
    async fn failure_uses_static_message() {
        let crm = InMemoryCrm::new();
        crm.fail(Endpoint::Projects);

        let view = load(&crm, &DashboardConfig::default(), Page::FIRST).await;
        assert_eq!(view.message(), Some(PROJECTS_LOAD_FAILED));
    }
}
