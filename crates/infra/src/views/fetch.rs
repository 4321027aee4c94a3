//! Fetch chains shared by the page views.
//!
//! Dependent reads are chained explicitly: the second call takes a field of
//! the first result. Independent reads run concurrently.

use crmdash_core::{ProjectId, QuotationId};
use crmdash_parties::Company;
use crmdash_projects::{Project, ReconciliationScope};
use crmdash_purchasing::{Expense, SupplierContract};
use crmdash_quotations::Quotation;

use crate::crm::{CrmResult, CrmSource};

/// Project, then the company it belongs to.
pub async fn fetch_project_with_company(
    source: &dyn CrmSource,
    id: ProjectId,
) -> CrmResult<(Project, Company)> {
    let project = source.project(id).await?;
    let company = source.company(project.company_id).await?;
    Ok((project, company))
}

/// Quotation, then the company it was issued to.
pub async fn fetch_quotation_with_company(
    source: &dyn CrmSource,
    id: QuotationId,
) -> CrmResult<(Quotation, Company)> {
    let quotation = source.quotation(id).await?;
    let company = source.company(quotation.company_id).await?;
    Ok((quotation, company))
}

/// Supplier contracts and expenses of a project, fetched concurrently.
pub async fn fetch_reconciliation_inputs(
    source: &dyn CrmSource,
    scope: &ReconciliationScope,
) -> CrmResult<(Vec<SupplierContract>, Vec<Expense>)> {
    tracing::debug!(
        project_id = %scope.project_id,
        title_query = %scope.title_query,
        "loading supplier contracts and expenses"
    );

    tokio::try_join!(
        source.supplier_contracts(&scope.title_query, scope.window.start),
        source.expenses(&scope.window, scope.project_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::{CrmError, Endpoint, InMemoryCrm};
    use crate::views::fixtures;

    #[tokio::test]
    async fn project_chain_follows_company_reference() {
        let crm = InMemoryCrm::new();
        crm.insert_company(fixtures::company(7, "Acme"));
        crm.insert_project(fixtures::project(1, 7, Some("Site Lyon")));

        let (project, company) = fetch_project_with_company(&crm, ProjectId::new(1)).await.unwrap();
        assert_eq!(project.company_id, company.id);
        assert_eq!(company.name, "Acme");
    }

    #[tokio::test]
    async fn missing_company_breaks_the_chain() {
        let crm = InMemoryCrm::new();
        crm.insert_project(fixtures::project(1, 7, Some("Site Lyon")));

        let err = fetch_project_with_company(&crm, ProjectId::new(1)).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound { entity: "company", .. }));
    }

    #[tokio::test]
    async fn quotation_chain_follows_company_reference() {
        let crm = InMemoryCrm::new();
        crm.insert_company(fixtures::company(3, "Globex"));
        crm.insert_quotation(fixtures::quotation(10, 3, None));

        let (quotation, company) = fetch_quotation_with_company(&crm, QuotationId::new(10))
            .await
            .unwrap();
        assert_eq!(quotation.id, QuotationId::new(10));
        assert_eq!(company.name, "Globex");
    }

    #[tokio::test]
    async fn either_concurrent_fetch_failing_fails_both() {
        let crm = InMemoryCrm::new();
        let project = fixtures::project(1, 7, Some("Site Lyon"));
        crm.insert_contract(fixtures::contract(100, "Site Lyon - baies", 1000.0, &[]));
        crm.insert_expense(fixtures::expense(5, 1, 200.0, 0.0));

        let scope = project.reconciliation_scope().unwrap();
        let (contracts, expenses) = fetch_reconciliation_inputs(&crm, &scope).await.unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(expenses.len(), 1);

        crm.fail(Endpoint::Expenses);
        assert!(fetch_reconciliation_inputs(&crm, &scope).await.is_err());
    }
}
