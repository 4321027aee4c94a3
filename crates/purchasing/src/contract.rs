use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crmdash_core::text::comment_preview;
use crmdash_core::{ExpenseId, Record, SupplierContractId};
use crmdash_parties::SupplierRef;

/// Reference from a supplier contract to an expense recorded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRef {
    pub id: ExpenseId,
}

/// A supplier contract (purchase commitment) as served by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierContract {
    pub id: SupplierContractId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub pre_tax_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub supplier: Option<SupplierRef>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRef>,
    /// Free text, HTML as typed in the CRM.
    #[serde(default)]
    pub comments: Option<String>,
}

impl SupplierContract {
    pub fn expense_ids(&self) -> impl Iterator<Item = ExpenseId> + '_ {
        self.expenses.iter().map(|e| e.id)
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier.as_ref().map(|s| s.name.as_str())
    }

    /// Plain-text comment, at most `limit` characters plus an ellipsis.
    pub fn comment_preview(&self, limit: usize) -> String {
        comment_preview(self.comments.as_deref(), limit)
    }

    /// Case-insensitive title match used to find a project's contracts.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Record for SupplierContract {
    type Id = SupplierContractId;
    const KIND: &'static str = "supplier contract";

    fn id(&self) -> SupplierContractId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_crm_payload() {
        let contract: SupplierContract = serde_json::from_str(
            r#"{
                "id": 10,
                "title": "Site Lyon - caméras",
                "start_date": "2024-01-15T00:00:00+01:00",
                "pre_tax_amount": 500.0,
                "total_amount": 600.0,
                "supplier": {"id": 3, "name": "Hanwha"},
                "expenses": [{"id": 1}, {"id": 4}],
                "comments": "<p>Livraison en <b>deux</b> fois</p>"
            }"#,
        )
        .unwrap();
        assert_eq!(
            contract.expense_ids().collect::<Vec<_>>(),
            vec![ExpenseId::new(1), ExpenseId::new(4)]
        );
        assert_eq!(contract.supplier_name(), Some("Hanwha"));
        assert_eq!(contract.comment_preview(90), "Livraison en deux fois");
    }

    #[test]
    fn title_match_ignores_case() {
        let contract: SupplierContract =
            serde_json::from_str(r#"{"id": 1, "title": "SITE LYON - câbles"}"#).unwrap();
        assert!(contract.title_matches("site lyon"));
        assert!(!contract.title_matches("Site Paris"));
    }
}
