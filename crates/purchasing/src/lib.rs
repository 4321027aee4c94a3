//! Purchasing domain module (expenses and supplier contracts).
//!
//! This crate holds the reconciliation of a project's recorded expenses
//! against its supplier contracts, implemented purely as deterministic logic
//! (no IO, no HTTP).

pub mod contract;
pub mod expense;
pub mod reconcile;

pub use contract::{ExpenseRef, SupplierContract};
pub use expense::{Expense, ExpenseLine};
pub use reconcile::{ContractReconciliation, ExpenseTotals, ReconciledContract, reconcile_contracts};
