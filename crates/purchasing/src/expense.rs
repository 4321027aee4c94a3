use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crmdash_core::{ExpenseId, ProjectId, Record};

/// One line of an expense (article bought).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub total_pre_tax_amount: f64,
}

/// An expense record as served by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub pre_tax_amount: f64,
    /// Amount including tax.
    #[serde(default)]
    pub total_amount: f64,
    /// Unpaid part of `total_amount`.
    #[serde(default)]
    pub left_to_pay: f64,
    #[serde(default)]
    pub accounting_code_name: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub public_path: Option<String>,
    #[serde(default)]
    pub expense_lines: Vec<ExpenseLine>,
}

impl Record for Expense {
    type Id = ExpenseId;
    const KIND: &'static str = "expense";

    fn id(&self) -> ExpenseId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_crm_payload() {
        let expense: Expense = serde_json::from_str(
            r#"{
                "id": 501,
                "title": "Câbles",
                "date": "2024-02-03T00:00:00+01:00",
                "pre_tax_amount": 100.0,
                "total_amount": 120.0,
                "left_to_pay": 60.0,
                "accounting_code_name": "Achats",
                "supplier_name": "Rexel",
                "project_id": 12,
                "expense_lines": [{"title": "RJ45", "quantity": 10, "total_pre_tax_amount": 100.0}]
            }"#,
        )
        .unwrap();
        assert_eq!(expense.id, ExpenseId::new(501));
        assert_eq!(expense.project_id, Some(ProjectId::new(12)));
        assert_eq!(expense.expense_lines[0].quantity, 10.0);
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        let expense: Expense = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(expense.total_amount, 0.0);
        assert!(expense.expense_lines.is_empty());
    }
}
