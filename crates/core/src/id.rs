//! Strongly-typed identifiers of CRM records.
//!
//! The CRM hands out numeric identifiers; wrapping them keeps a project id
//! from being passed where a company id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(pub u64);

        impl $t {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

numeric_id!(
    /// Identifier of a company (customer, prospect or supplier).
    CompanyId,
    "CompanyId"
);
numeric_id!(
    /// Identifier of a project.
    ProjectId,
    "ProjectId"
);
numeric_id!(
    /// Identifier of a quotation.
    QuotationId,
    "QuotationId"
);
numeric_id!(
    /// Identifier of an expense record.
    ExpenseId,
    "ExpenseId"
);
numeric_id!(
    /// Identifier of a supplier contract (purchase commitment).
    SupplierContractId,
    "SupplierContractId"
);
numeric_id!(SupplierId, "SupplierId");
numeric_id!(
    /// Identifier of a CRM user (sales representative, manager).
    UserId,
    "UserId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_path_segment() {
        let id: ProjectId = "42".parse().unwrap();
        assert_eq!(id, ProjectId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<QuotationId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("QuotationId")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&ExpenseId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: ExpenseId = serde_json::from_str("7").unwrap();
        assert_eq!(back, ExpenseId::new(7));
    }
}
