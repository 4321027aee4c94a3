//! Projects domain module.
//!
//! Project snapshots and the figures derived from a project record alone
//! (net margin, margin ratio). Pure logic: no IO, no HTTP.

pub mod financials;
pub mod project;

pub use financials::ProjectFinancials;
pub use project::{Project, ReconciliationScope};
