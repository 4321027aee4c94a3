use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crmdash_core::{CompanyId, Record, SupplierId, UserId};

/// Label shown when a company has no assigned manager.
pub const UNKNOWN_MANAGER: &str = "Unknown";

/// Party kind, derived from the CRM's customer/prospect/supplier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Customer,
    Prospect,
    Supplier,
}

/// Sales representative in charge of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessManager {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Postal address of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// `"City ZIP (Country)"`, skipping missing parts.
    pub fn locality(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [&self.city, &self.zip_code] {
            if let Some(p) = part.as_deref().filter(|p| !p.is_empty()) {
                parts.push(p);
            }
        }
        let mut out = parts.join(" ");
        if let Some(country) = self.country.as_deref().filter(|c| !c.is_empty()) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("({country})"));
        }
        out
    }
}

/// A company record as served by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creation_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default, alias = "zip_code")]
    pub address_zip_code: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,
    #[serde(default)]
    pub is_supplier: bool,
    #[serde(default)]
    pub is_prospect: bool,
    #[serde(default)]
    pub is_customer: bool,
    #[serde(default)]
    pub business_manager: Option<BusinessManager>,
}

impl Company {
    pub fn address(&self) -> Address {
        Address {
            street: self.address_street.clone(),
            zip_code: self.address_zip_code.clone(),
            city: self.address_city.clone(),
            country: self.address_country.clone(),
        }
    }

    /// Manager name, or [`UNKNOWN_MANAGER`].
    pub fn manager_name(&self) -> &str {
        self.business_manager
            .as_ref()
            .map(|m| m.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_MANAGER)
    }

    /// Every kind flagged on the record; a company may be both customer and supplier.
    pub fn kinds(&self) -> Vec<PartyKind> {
        let mut kinds = Vec::new();
        if self.is_customer {
            kinds.push(PartyKind::Customer);
        }
        if self.is_prospect {
            kinds.push(PartyKind::Prospect);
        }
        if self.is_supplier {
            kinds.push(PartyKind::Supplier);
        }
        kinds
    }
}

impl Record for Company {
    type Id = CompanyId;
    const KIND: &'static str = "company";

    fn id(&self) -> CompanyId {
        self.id
    }
}

/// Supplier reference embedded in supplier contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRef {
    pub id: SupplierId,
    #[serde(default)]
    pub name: String,
}
