pub mod comparison;
pub mod config;
pub mod designers;
pub mod error;
pub mod export;
pub mod handlers;
pub mod locale;
pub mod proficiency;
pub mod sessions;
pub mod skills;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::Config;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/info", get(handlers::service_info))
        .route("/skills/categories", get(handlers::list_categories))
        .route("/proficiency/scale", get(handlers::proficiency_scale))
        .route(
            "/designers",
            get(handlers::list_designers).post(handlers::create_designer),
        )
        .route(
            "/designers/{id}",
            get(handlers::get_designer)
                .put(handlers::rename_designer)
                .delete(handlers::delete_designer),
        )
        .route(
            "/designers/{id}/assessment",
            get(handlers::get_assessment).put(handlers::save_assessment),
        )
        .route("/designers/{id}/assessments", get(handlers::list_assessments))
        .route(
            "/designers/{id}/skills/{skill}/pointer",
            post(handlers::pointer_event),
        )
        .route("/designers/{id}/export", get(handlers::export_designer))
        .route("/compare", post(handlers::compare_designers))
        .route("/compare/export", post(handlers::export_comparison))
        .route("/export", get(handlers::export_all))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
