use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::proficiency::{Commit, DragFrame, ProficiencyControl, Track};
use crate::skills::{SkillCategory, SkillStore, SkillStoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Pointer capture lost or window blurred; the gesture is discarded.
    ///
    /// A `down` with no matching `up` leaves the skill dragging, and later
    /// `down` events on it are rejected. Send `cancel` to return it to idle.
    Cancel,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    #[serde(default)]
    pub position: Option<f64>,
}

/// Live drag gestures, one control per designer and skill.
///
/// Only controls with an active gesture are kept; a released or cancelled
/// control is dropped, which is indistinguishable from a fresh idle one.
pub struct DragSessions {
    controls: DashMap<String, ProficiencyControl>,
    track: Track,
}

fn session_key(designer: &Uuid, category: SkillCategory) -> String {
    format!("{}/{}", designer, category.name())
}

impl DragSessions {
    pub fn new(track: Track) -> Self {
        Self {
            controls: DashMap::new(),
            track,
        }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn is_dragging(&self, designer: &Uuid, category: SkillCategory) -> bool {
        self.controls
            .get(&session_key(designer, category))
            .map(|c| c.is_dragging())
            .unwrap_or(false)
    }

    pub fn frame(&self, designer: &Uuid, category: SkillCategory) -> Option<DragFrame> {
        self.controls
            .get(&session_key(designer, category))
            .and_then(|c| c.frame())
    }

    pub fn begin<S: SkillStore + ?Sized>(
        &self,
        designer: &Uuid,
        category: SkillCategory,
        store: &S,
        pointer: f64,
    ) -> bool {
        let key = session_key(designer, category);
        let started = self
            .controls
            .entry(key.clone())
            .or_insert_with(|| ProficiencyControl::new(category.name(), self.track))
            .begin_drag(store, pointer);

        if started {
            tracing::debug!(%designer, skill = category.name(), pointer, "drag started");
        } else {
            self.drop_if_idle(&key);
        }
        started
    }

    pub fn update(&self, designer: &Uuid, category: SkillCategory, pointer: f64) -> Option<DragFrame> {
        self.controls
            .get_mut(&session_key(designer, category))
            .and_then(|mut c| c.update_drag(pointer))
    }

    pub fn end<S: SkillStore + ?Sized>(
        &self,
        designer: &Uuid,
        category: SkillCategory,
        store: &mut S,
    ) -> Result<Option<Commit>, SkillStoreError> {
        let key = session_key(designer, category);
        let result = match self.controls.get_mut(&key) {
            Some(mut control) => control.end_drag(store),
            None => Ok(None),
        };
        self.drop_if_idle(&key);

        if let Ok(Some(commit)) = &result {
            tracing::debug!(%designer, skill = %commit.skill, proficiency = commit.proficiency, "drag committed");
        }
        result
    }

    pub fn cancel(&self, designer: &Uuid, category: SkillCategory) -> bool {
        let key = session_key(designer, category);
        let cancelled = self
            .controls
            .get_mut(&key)
            .map(|mut c| c.cancel_drag())
            .unwrap_or(false);
        self.drop_if_idle(&key);

        if cancelled {
            tracing::debug!(%designer, skill = category.name(), "drag cancelled");
        }
        cancelled
    }

    /// Discard every gesture belonging to `designer`.
    pub fn clear_designer(&self, designer: &Uuid) {
        let prefix = format!("{}/", designer);
        self.controls.retain(|key, _| !key.starts_with(&prefix));
    }

    pub fn active_count(&self) -> usize {
        self.controls.iter().filter(|c| c.is_dragging()).count()
    }

    fn drop_if_idle(&self, key: &str) {
        self.controls.remove_if(key, |_, c| !c.is_dragging());
    }
}
