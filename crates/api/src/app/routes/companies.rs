use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    routing::get,
    Router,
};

use crate::app::dto::{self, PageQuery};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_companies))
}

pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<PageQuery>,
) -> axum::response::Response {
    let page = match query.page() {
        Ok(page) => page,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().company_list(page).await)
}
