use crate::locale::Locale;
use crate::proficiency::TrackDirection;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime: f64,
    pub active_drags: usize,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        uptime: state.uptime_secs(),
        active_drags: state.sessions.active_count(),
    })
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub version: &'static str,
    pub data_dir: String,
    pub track_length: f64,
    pub track_direction: TrackDirection,
    pub locale: Locale,
}

pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    let track = state.sessions.track();

    Json(ServiceInfo {
        version: env!("CARGO_PKG_VERSION"),
        data_dir: state.config.data_dir.clone(),
        track_length: track.length(),
        track_direction: track.direction(),
        locale: state.config.locale,
    })
}
