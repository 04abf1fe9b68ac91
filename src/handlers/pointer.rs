use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::{parse_id, parse_skill};
use crate::error::{AppError, Result};
use crate::proficiency::{DragFrame, Reading};
use crate::sessions::{PointerEvent, PointerEventKind};
use crate::state::AppState;

#[derive(Serialize)]
pub struct FrameView {
    pub offset: f64,
    #[serde(flatten)]
    pub reading: Reading,
}

// POST /designers/:id/skills/:skill/pointer
#[derive(Serialize)]
pub struct PointerResponse {
    pub skill: &'static str,
    /// False when the event was out of order and ignored
    pub accepted: bool,
    pub dragging: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<Reading>,
}

fn require_position(event: &PointerEvent) -> Result<f64> {
    match event.position {
        Some(p) if p.is_finite() => Ok(p),
        Some(_) => Err(AppError::BadRequest("Pointer position must be finite".into())),
        None => Err(AppError::BadRequest(format!(
            "Pointer position is required for '{:?}' events",
            event.kind
        ))),
    }
}

pub async fn pointer_event(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<PointerResponse>> {
    let id = parse_id(&id)?;
    let category = parse_skill(&skill)?;
    let locale = state.config.locale;
    let sessions = &state.sessions;

    let view = |frame: DragFrame| FrameView {
        offset: frame.offset,
        reading: frame.reading(locale),
    };

    let (accepted, committed) = match event.kind {
        PointerEventKind::Down => {
            let position = require_position(&event)?;
            let sheet = state.designers.sheet(&id).await?;
            (sessions.begin(&id, category, &sheet, position), None)
        }
        PointerEventKind::Move => {
            let position = require_position(&event)?;
            (sessions.update(&id, category, position).is_some(), None)
        }
        PointerEventKind::Up => {
            if sessions.is_dragging(&id, category) {
                let mut commit = None;
                state
                    .designers
                    .update_sheet(&id, |sheet| {
                        commit = sessions.end(&id, category, sheet)?;
                        Ok(commit.is_some())
                    })
                    .await
                    .inspect_err(|_| {
                        // A failed commit or save still ends the gesture
                        sessions.cancel(&id, category);
                    })?;

                let committed = commit.map(|c| Reading::new(c.proficiency as i32, locale));
                (committed.is_some(), committed)
            } else {
                tracing::debug!(%id, skill = category.name(), "stale pointer-up ignored");
                (false, None)
            }
        }
        PointerEventKind::Cancel => (sessions.cancel(&id, category), None),
    };

    Ok(Json(PointerResponse {
        skill: category.name(),
        accepted,
        dragging: sessions.is_dragging(&id, category),
        frame: sessions.frame(&id, category).map(view),
        committed,
    }))
}
