use axum::Router;

pub mod companies;
pub mod projects;
pub mod quotations;
pub mod system;

/// Router for the dashboard page endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/companies", companies::router())
        .nest("/projects", projects::router())
        .nest("/quotations", quotations::router())
}
