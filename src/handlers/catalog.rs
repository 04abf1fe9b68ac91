use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::LocaleQuery;
use crate::proficiency::{scale, Reading};
use crate::skills::SkillCategory;
use crate::state::AppState;

// GET /skills/categories
#[derive(Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub name_nb: &'static str,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

pub async fn list_categories() -> Json<CategoriesResponse> {
    let categories = SkillCategory::ALL
        .iter()
        .map(|c| CategoryInfo {
            key: c.key(),
            name: c.name(),
            name_nb: c.name_nb(),
        })
        .collect();
    Json(CategoriesResponse { categories })
}

// GET /proficiency/scale
#[derive(Serialize)]
pub struct ScaleResponse {
    pub buckets: Vec<Reading>,
}

pub async fn proficiency_scale(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Json<ScaleResponse> {
    Json(ScaleResponse {
        buckets: scale(query.or(state.config.locale)),
    })
}
