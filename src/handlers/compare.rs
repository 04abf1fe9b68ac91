use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::parse_id;
use crate::comparison::{self, load_entries, Comparison};
use crate::error::{AppError, Result};
use crate::export::{self, ExportDocument};
use crate::locale::Locale;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub designer_ids: Vec<String>,
}

impl CompareRequest {
    fn ids(&self) -> Result<Vec<Uuid>> {
        self.designer_ids.iter().map(|raw| parse_id(raw)).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub locale: Option<Locale>,
    /// Return the Markdown file itself instead of a JSON envelope
    #[serde(default)]
    pub download: bool,
}

fn respond(doc: ExportDocument, download: bool) -> Result<Response> {
    if !download {
        return Ok(Json(doc).into_response());
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.file_name),
            ),
        ],
        doc.body,
    )
        .into_response())
}

// POST /compare
pub async fn compare_designers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<Comparison>> {
    let locale = query.locale.unwrap_or(state.config.locale);
    let table = comparison::compare(&state.designers, &req.ids()?, locale).await?;
    Ok(Json(table))
}

// POST /compare/export
pub async fn export_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
    Json(req): Json<CompareRequest>,
) -> Result<Response> {
    let locale = query.locale.unwrap_or(state.config.locale);
    let entries = load_entries(&state.designers, &req.ids()?).await?;
    let comparison = Comparison::build(&entries, locale);

    let doc = export::comparison_document(&comparison, locale, Utc::now());
    tracing::info!(file = %doc.file_name, designers = entries.len(), "comparison exported");
    respond(doc, query.download)
}

// GET /designers/:id/export
pub async fn export_designer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    let locale = query.locale.unwrap_or(state.config.locale);

    let designer = state.designers.get(&id).await?;
    let assessment = state.designers.latest_assessment(&id).await?;

    let doc = export::assessment_document(&designer, assessment.as_ref(), locale, Utc::now());
    tracing::info!(file = %doc.file_name, %id, "assessment exported");
    respond(doc, query.download)
}

// GET /export
pub async fn export_all(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let locale = query.locale.unwrap_or(state.config.locale);

    let mut entries = Vec::new();
    for designer in state.designers.list().await? {
        let assessment = match state.designers.latest_assessment(&designer.id).await {
            Ok(assessment) => assessment,
            // Deleted between listing and loading
            Err(AppError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        };
        entries.push((designer, assessment));
    }

    let doc = export::all_assessments_document(&entries, locale, Utc::now());
    tracing::info!(file = %doc.file_name, designers = entries.len(), "all assessments exported");
    respond(doc, query.download)
}
