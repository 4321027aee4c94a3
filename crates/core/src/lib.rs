//! `crmdash-core`: shared building blocks for the reporting domain.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP): typed
//! identifiers, the domain error model, zero-safe arithmetic helpers used by
//! every financial view, date windows and text previews.

pub mod error;
pub mod id;
pub mod money;
pub mod page;
pub mod record;
pub mod text;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use id::{CompanyId, ExpenseId, ProjectId, QuotationId, SupplierContractId, SupplierId, UserId};
pub use page::Page;
pub use record::Record;
pub use time::DateWindow;
