use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crmdash_core::money::{safe_percent, safe_ratio, sum};
use crmdash_core::{CompanyId, ProjectId, QuotationId, Record, UserId};

/// Product-code prefix marking in-house service lines.
pub const DEFAULT_SERVICE_CODE_PREFIX: &str = "Pix_";

/// Quotation status as reported by the CRM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Pending,
    Accepted,
    Refused,
    /// Any status this dashboard does not track.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Display color of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Orange,
    Red,
    Black,
}

impl QuotationStatus {
    pub fn color(&self) -> StatusColor {
        match self {
            QuotationStatus::Accepted => StatusColor::Green,
            QuotationStatus::Pending => StatusColor::Orange,
            QuotationStatus::Refused => StatusColor::Red,
            QuotationStatus::Unknown => StatusColor::Black,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Refused => "refused",
            QuotationStatus::Unknown => "unknown",
        }
    }
}

/// One line of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLine {
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    /// Unit price, pre-tax.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub pre_tax_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub margin: f64,
    /// Unit purchase cost.
    #[serde(default)]
    pub unit_job_costing: f64,
}

impl QuotationLine {
    /// Margin as a percentage of the line's pre-tax amount (0 on a zero amount).
    pub fn margin_percent(&self) -> f64 {
        safe_percent(self.margin, self.pre_tax_amount)
    }

    pub fn is_service(&self, prefix: &str) -> bool {
        self.product_code
            .as_deref()
            .is_some_and(|code| code.starts_with(prefix))
    }
}

/// A quotation record as served by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: QuotationId,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub last_update_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub company_id: CompanyId,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub opportunity_id: Option<u64>,
    #[serde(default)]
    pub contract_id: Option<u64>,
    #[serde(default)]
    pub pre_tax_amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub public_path: Option<String>,
    #[serde(default)]
    pub customer_portal_url: Option<String>,
    #[serde(default)]
    pub quotation_lines: Vec<QuotationLine>,
}

impl Quotation {
    /// Margin as a fraction of the pre-tax amount (0 on a zero amount).
    pub fn margin_ratio(&self) -> f64 {
        safe_ratio(self.margin, self.pre_tax_amount)
    }

    /// Margin as a percentage of the pre-tax amount (0 on a zero amount).
    pub fn margin_percent(&self) -> f64 {
        safe_percent(self.margin, self.pre_tax_amount)
    }

    /// Total unit job costing over the service lines.
    pub fn service_cost_total(&self, prefix: &str) -> f64 {
        sum(self
            .quotation_lines
            .iter()
            .filter(|line| line.is_service(prefix))
            .map(|line| line.unit_job_costing))
    }
}

impl Record for Quotation {
    type Id = QuotationId;
    const KIND: &'static str = "quotation";

    fn id(&self) -> QuotationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const QUOTATION_JSON: &str = r#"{
        "id": 7423684,
        "number": "Pix4627",
        "title": "Pix4627",
        "date": "2024-12-06T00:00:00+01:00",
        "expiry_date": "2025-01-05T00:00:00+01:00",
        "sent_date": null,
        "status": "pending",
        "user_id": 462785,
        "company_id": 27714284,
        "company_name": "SPIE BUILDING SOLUTIONS",
        "project_id": null,
        "pre_tax_amount": 1152.48,
        "tax_amount": 230.5,
        "total_amount": 1382.98,
        "margin": 82.31999999999991,
        "comments": "",
        "quotation_lines": [
            {
                "product_id": 20680908,
                "product_code": "XND-6080R",
                "product_name": "XND-6080R",
                "quantity": 1,
                "price": 351.96,
                "tax_rates": [],
                "line_discount_amount": "0.00",
                "pre_tax_amount": 351.96,
                "total_amount": 422.35,
                "margin": 25.14,
                "unit_job_costing": 326.82
            },
            {
                "product_code": "Pix_INSTALL",
                "product_name": "Installation",
                "quantity": 2,
                "price": 400.26,
                "pre_tax_amount": 800.52,
                "margin": 57.18,
                "unit_job_costing": 371.67
            }
        ]
    }"#;

    fn quotation() -> Quotation {
        serde_json::from_str(QUOTATION_JSON).unwrap()
    }

    #[test]
    fn deserializes_crm_payload() {
        let q = quotation();
        assert_eq!(q.id, QuotationId::new(7423684));
        assert_eq!(q.status, QuotationStatus::Pending);
        assert_eq!(q.project_id, None);
        assert_eq!(q.quotation_lines.len(), 2);
    }

    #[test]
    fn unknown_status_maps_to_unknown() {
        let q: Quotation =
            serde_json::from_str(r#"{"id": 1, "company_id": 2, "status": "draft"}"#).unwrap();
        assert_eq!(q.status, QuotationStatus::Unknown);
        assert_eq!(q.status.color(), StatusColor::Black);
    }

    #[test]
    fn status_colors() {
        assert_eq!(QuotationStatus::Accepted.color(), StatusColor::Green);
        assert_eq!(QuotationStatus::Pending.color(), StatusColor::Orange);
        assert_eq!(QuotationStatus::Refused.color(), StatusColor::Red);
    }

    #[test]
    fn margin_percent_of_quotation_and_lines() {
        let q = quotation();
        assert!((q.margin_percent() - 7.1428).abs() < 1e-3);
        assert!((q.quotation_lines[0].margin_percent() - 7.1428).abs() < 1e-3);
    }

    #[test]
    fn zero_pre_tax_amount_gives_zero_margin() {
        let q: Quotation =
            serde_json::from_str(r#"{"id": 1, "company_id": 2, "margin": 10.0}"#).unwrap();
        assert_eq!(q.margin_percent(), 0.0);
        assert_eq!(q.margin_ratio(), 0.0);
    }

    #[test]
    fn service_cost_counts_only_prefixed_lines() {
        let q = quotation();
        assert!((q.service_cost_total(DEFAULT_SERVICE_CODE_PREFIX) - 371.67).abs() < 1e-9);
        assert_eq!(q.service_cost_total("NOPE_"), 0.0);
    }

    proptest! {
        #[test]
        fn line_margin_percent_is_finite(margin in -1.0e7f64..1.0e7, amount in -1.0e7f64..1.0e7) {
            let line = QuotationLine {
                product_id: None,
                product_code: None,
                product_name: None,
                title: None,
                quantity: 1.0,
                price: amount,
                pre_tax_amount: amount,
                total_amount: amount,
                margin,
                unit_job_costing: 0.0,
            };
            prop_assert!(line.margin_percent().is_finite());
        }
    }
}
