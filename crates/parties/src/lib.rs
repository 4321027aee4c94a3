//! Parties domain module (companies, their managers, suppliers).
//!
//! Read-only snapshots of CRM parties, deserialized as the CRM returns them.

pub mod company;

pub use company::{Address, BusinessManager, Company, PartyKind, SupplierRef, UNKNOWN_MANAGER};
