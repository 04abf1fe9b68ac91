use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::{parse_id, LocaleQuery};
use crate::designers::{Assessment, AssessmentPayload, Designer};
use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::proficiency::Reading;
use crate::skills::{SkillCategory, SkillSheet};
use crate::state::AppState;

// GET /designers
#[derive(Serialize)]
pub struct ListDesignersResponse {
    pub designers: Vec<Designer>,
}

pub async fn list_designers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListDesignersResponse>> {
    let designers = state.designers.list().await?;
    Ok(Json(ListDesignersResponse { designers }))
}

// POST /designers
#[derive(Deserialize)]
pub struct DesignerNameRequest {
    pub name: String,
}

pub async fn create_designer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DesignerNameRequest>,
) -> Result<(StatusCode, Json<Designer>)> {
    let designer = state.designers.create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(designer)))
}

// GET /designers/:id
pub async fn get_designer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Designer>> {
    let designer = state.designers.get(&parse_id(&id)?).await?;
    Ok(Json(designer))
}

// PUT /designers/:id
pub async fn rename_designer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<DesignerNameRequest>,
) -> Result<Json<Designer>> {
    let designer = state.designers.rename(&parse_id(&id)?, &req.name).await?;
    Ok(Json(designer))
}

// DELETE /designers/:id
#[derive(Serialize)]
pub struct DeleteDesignerResponse {
    pub success: bool,
    pub message: String,
}

pub async fn delete_designer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteDesignerResponse>> {
    let id = parse_id(&id)?;
    state.designers.delete(&id).await?;
    state.sessions.clear_designer(&id);

    Ok(Json(DeleteDesignerResponse {
        success: true,
        message: format!("Designer '{}' deleted", id),
    }))
}

#[derive(Serialize)]
pub struct SkillView {
    pub name: &'static str,
    /// Skill name in the requested locale
    pub display_name: &'static str,
    #[serde(flatten)]
    pub reading: Reading,
}

#[derive(Serialize)]
pub struct AssessmentResponse {
    pub designer_id: Uuid,
    pub timestamp: Option<DateTime<Utc>>,
    pub skills: Vec<SkillView>,
}

impl AssessmentResponse {
    pub fn new(designer_id: Uuid, sheet: &SkillSheet, timestamp: Option<DateTime<Utc>>, locale: Locale) -> Self {
        let skills = SkillCategory::ALL
            .iter()
            .map(|c| SkillView {
                name: c.name(),
                display_name: c.localized(locale),
                reading: Reading::new(sheet.get(*c) as i32, locale),
            })
            .collect();

        Self {
            designer_id,
            timestamp,
            skills,
        }
    }

    pub fn from_assessment(designer_id: Uuid, assessment: &Assessment, locale: Locale) -> Self {
        Self::new(designer_id, &assessment.skills, Some(assessment.timestamp), locale)
    }
}

// GET /designers/:id/assessment
pub async fn get_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<AssessmentResponse>> {
    let id = parse_id(&id)?;
    let locale = query.or(state.config.locale);

    let response = match state.designers.latest_assessment(&id).await? {
        Some(assessment) => AssessmentResponse::from_assessment(id, &assessment, locale),
        None => AssessmentResponse::new(id, &SkillSheet::default(), None, locale),
    };
    Ok(Json(response))
}

// GET /designers/:id/assessments
#[derive(Serialize)]
pub struct AssessmentHistoryResponse {
    pub assessments: Vec<AssessmentResponse>,
}

pub async fn list_assessments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<AssessmentHistoryResponse>> {
    let id = parse_id(&id)?;
    let locale = query.or(state.config.locale);

    let assessments = state
        .designers
        .assessments(&id)
        .await?
        .iter()
        .map(|a| AssessmentResponse::from_assessment(id, a, locale))
        .collect();
    Ok(Json(AssessmentHistoryResponse { assessments }))
}

// PUT /designers/:id/assessment - bulk save of the whole skill list
pub async fn save_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
    Json(body): Json<Value>,
) -> Result<Json<AssessmentResponse>> {
    let id = parse_id(&id)?;
    let locale = query.or(state.config.locale);

    // serde would otherwise accept the struct written as a JSON array
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Expected {\"skills\": [...]} as the request body".into(),
        ));
    }
    let payload: AssessmentPayload = serde_json::from_value(body).map_err(|e| {
        AppError::BadRequest(format!(
            "Expected {{\"skills\": [{{\"name\", \"proficiency\"}}]}}: {}",
            e
        ))
    })?;
    let sheet = payload.into_sheet()?;

    let assessment = state.designers.save_assessment(&id, sheet).await?;
    tracing::info!(%id, "assessment saved");
    Ok(Json(AssessmentResponse::from_assessment(id, &assessment, locale)))
}
