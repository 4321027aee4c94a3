use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crmdash_core::{DomainError, Page};
use crmdash_infra::ViewState;

use crate::app::errors;
use crate::context::RequestContext;

// -------------------------
// Request DTOs
// -------------------------

/// `?page=N` on list endpoints; absent means the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, axum::response::Response> {
        let Some(raw) = self.page.as_deref().map(str::trim) else {
            return Ok(Page::FIRST);
        };
        let number: u32 = raw.parse().map_err(|_| {
            errors::domain_error_to_response(DomainError::validation(format!(
                "page must be a positive integer, got {raw:?}"
            )))
        })?;
        Page::new(number).map_err(errors::domain_error_to_response)
    }
}

/// Parse a path id (`ProjectId`, `QuotationId`, ...).
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}

// -------------------------
// Responses
// -------------------------

/// Render a page view: ready → 200, failed → 502, loading → 202.
pub fn view_to_response<T: Serialize>(
    ctx: &RequestContext,
    view: ViewState<T>,
) -> axum::response::Response {
    let status = match &view {
        ViewState::Ready(_) => StatusCode::OK,
        ViewState::Failed(message) => {
            tracing::warn!(request_id = %ctx.request_id(), %message, "view failed to load");
            StatusCode::BAD_GATEWAY
        }
        ViewState::Loading => StatusCode::ACCEPTED,
    };
    (status, axum::Json(view)).into_response()
}
