use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Router,
};

use crmdash_core::QuotationId;

use crate::app::dto::{self, PageQuery};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_quotations))
        .route("/:id", get(get_quotation))
        .route("/:id/project", get(get_quotation_with_project))
}

pub async fn list_quotations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<PageQuery>,
) -> axum::response::Response {
    let page = match query.page() {
        Ok(page) => page,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().quotation_list(page).await)
}

pub async fn get_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().quotation_details(id).await)
}

/// Quotation details next to the details of its project.
pub async fn get_quotation_with_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().quotation_with_project(id).await)
}
