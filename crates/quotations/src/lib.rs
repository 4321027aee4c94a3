//! Quotations domain module.
//!
//! Quotation snapshots, their lines, and the margin figures shown on the
//! quotation list and detail pages. Pure logic: no IO, no HTTP.

pub mod quotation;

pub use quotation::{
    DEFAULT_SERVICE_CODE_PREFIX, Quotation, QuotationLine, QuotationStatus, StatusColor,
};
