use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Router,
};

use crmdash_core::ProjectId;

use crate::app::dto::{self, PageQuery};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_projects))
        .route("/:id", get(get_project))
}

pub async fn list_projects(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<PageQuery>,
) -> axum::response::Response {
    let page = match query.page() {
        Ok(page) => page,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().project_list(page).await)
}

pub async fn get_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    dto::view_to_response(&ctx, services.dashboard().project_details(id).await)
}
