//! CRM records for view tests, built from JSON the way the API serves them.

use serde_json::json;

use crmdash_parties::Company;
use crmdash_projects::Project;
use crmdash_purchasing::{Expense, SupplierContract};
use crmdash_quotations::Quotation;

pub const ESTIMATED_START: &str = "2024-01-01T00:00:00+01:00";
pub const ESTIMATED_END: &str = "2024-12-31T00:00:00+01:00";

pub fn company(id: u64, name: &str) -> Company {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "address_street": "12 rue de la Paix",
        "address_zip_code": "69001",
        "address_city": "Lyon",
        "address_country": "France",
        "is_customer": true,
        "business_manager": { "id": 4, "name": "Claire Martin", "email": "claire@example.com" }
    }))
    .unwrap()
}

pub fn project(id: u64, company_id: u64, name: Option<&str>) -> Project {
    serde_json::from_value(json!({
        "id": id,
        "number": format!("PRJ-{id}"),
        "name": name,
        "company_id": company_id,
        "estimated_start": ESTIMATED_START,
        "estimated_end": ESTIMATED_END,
        "estimated_revenue": 1500.0,
        "actual_revenue": 1000.0,
        "actual_expenses_cost": 400.0
    }))
    .unwrap()
}

pub fn quotation(id: u64, company_id: u64, project_id: Option<u64>) -> Quotation {
    serde_json::from_value(json!({
        "id": id,
        "number": format!("D-{id}"),
        "title": "Baies vitrées",
        "date": "2024-02-01T00:00:00+01:00",
        "status": "accepted",
        "company_id": company_id,
        "company_name": "Acme",
        "project_id": project_id,
        "pre_tax_amount": 1000.0,
        "tax_amount": 200.0,
        "total_amount": 1200.0,
        "margin": 250.0,
        "public_path": "https://crm.example.com/quotations/public/abc",
        "quotation_lines": [
            {
                "product_code": "Pix_POSE",
                "product_name": "Pose",
                "quantity": 2.0,
                "price": 200.0,
                "pre_tax_amount": 400.0,
                "margin": 150.0,
                "unit_job_costing": 60.0
            },
            {
                "product_code": "BAIE-01",
                "product_name": "Baie coulissante",
                "quantity": 1.0,
                "price": 600.0,
                "pre_tax_amount": 600.0,
                "margin": 100.0,
                "unit_job_costing": 500.0
            }
        ]
    }))
    .unwrap()
}

pub fn contract(
    id: u64,
    title: &str,
    pre_tax_amount: f64,
    expense_ids: &[u64],
) -> SupplierContract {
    let expenses: Vec<_> = expense_ids.iter().map(|id| json!({ "id": id })).collect();
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "start_date": "2024-02-01T00:00:00+01:00",
        "pre_tax_amount": pre_tax_amount,
        "total_amount": pre_tax_amount * 1.2,
        "supplier": { "id": 50, "name": "Verrerie du Rhône" },
        "expenses": expenses,
        "comments": "<p>Livraison <b>semaine 12</b></p>"
    }))
    .unwrap()
}

pub fn expense(id: u64, project_id: u64, total_amount: f64, left_to_pay: f64) -> Expense {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Facture {id}"),
        "date": "2024-03-01T00:00:00+01:00",
        "pre_tax_amount": total_amount / 1.2,
        "total_amount": total_amount,
        "left_to_pay": left_to_pay,
        "accounting_code_name": "Achats",
        "supplier_name": "Verrerie du Rhône",
        "project_id": project_id,
        "expense_lines": [
            { "title": "Verre", "quantity": 3.0, "total_pre_tax_amount": total_amount / 1.2 }
        ]
    }))
    .unwrap()
}
