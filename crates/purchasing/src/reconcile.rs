//! Reconciliation of supplier contracts against recorded expenses.
//!
//! A contract counts as "already expensed" when any expense it references is
//! part of the project's expense set for the same window. This is a plain
//! set-membership check: the CRM guarantees no consistency between the two.

use std::collections::HashSet;

use serde::Serialize;

use crmdash_core::ExpenseId;
use crmdash_core::money::{safe_percent, sum};

use crate::contract::SupplierContract;
use crate::expense::Expense;

/// A supplier contract annotated with its expense status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledContract {
    #[serde(flatten)]
    pub contract: SupplierContract,
    pub has_expense: bool,
}

/// Annotated contracts and the commitment not yet reflected in expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractReconciliation {
    pub contracts: Vec<ReconciledContract>,
    /// Sum of pre-tax amounts over contracts with `has_expense == false`.
    pub unexpensed_contract_total: f64,
}

/// Flag each contract whose linked expenses intersect `expenses`.
pub fn reconcile_contracts(
    expenses: &[Expense],
    contracts: Vec<SupplierContract>,
) -> ContractReconciliation {
    let expense_ids: HashSet<ExpenseId> = expenses.iter().map(|e| e.id).collect();

    let contracts: Vec<ReconciledContract> = contracts
        .into_iter()
        .map(|contract| {
            let has_expense = contract.expense_ids().any(|id| expense_ids.contains(&id));
            ReconciledContract { contract, has_expense }
        })
        .collect();

    let unexpensed_contract_total = sum(contracts
        .iter()
        .filter(|c| !c.has_expense)
        .map(|c| c.contract.pre_tax_amount));

    tracing::debug!(
        contracts = contracts.len(),
        expenses = expense_ids.len(),
        unexpensed_contract_total,
        "reconciled supplier contracts"
    );

    ContractReconciliation {
        contracts,
        unexpensed_contract_total,
    }
}

/// Totals over a project's expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpenseTotals {
    pub total_expenses_pre_tax: f64,
    /// Sum of amounts including tax.
    pub total_expenses_gross: f64,
    pub total_left_to_pay: f64,
    /// `total_left_to_pay / total_expenses_gross * 100`, 0 when nothing was spent.
    pub percent_left_to_pay: f64,
}

impl ExpenseTotals {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let total_expenses_pre_tax = sum(expenses.iter().map(|e| e.pre_tax_amount));
        let total_expenses_gross = sum(expenses.iter().map(|e| e.total_amount));
        let total_left_to_pay = sum(expenses.iter().map(|e| e.left_to_pay));
        Self {
            total_expenses_pre_tax,
            total_expenses_gross,
            total_left_to_pay,
            percent_left_to_pay: safe_percent(total_left_to_pay, total_expenses_gross),
        }
    }
}
