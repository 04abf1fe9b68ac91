use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::scale::{clamp_proficiency, snap_to_bucket, Reading, MAX_PROFICIENCY};
use crate::locale::Locale;
use crate::skills::{SkillStore, SkillStoreError};

pub const DEFAULT_TRACK_LENGTH: f64 = 300.0;

/// Which pointer direction grows the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackDirection {
    /// Positive pointer delta (moving down the screen) increases proficiency.
    #[default]
    Downward,
    /// Negative pointer delta (moving up the screen) increases proficiency.
    Upward,
}

impl TrackDirection {
    fn sign(&self) -> f64 {
        match self {
            TrackDirection::Downward => 1.0,
            TrackDirection::Upward => -1.0,
        }
    }
}

impl FromStr for TrackDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" | "downward" => Ok(TrackDirection::Downward),
            "up" | "upward" => Ok(TrackDirection::Upward),
            other => Err(format!("Unknown track direction: {}", other)),
        }
    }
}

/// The 1-D extent a drag maps onto. `length` is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    length: f64,
    direction: TrackDirection,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            length: DEFAULT_TRACK_LENGTH,
            direction: TrackDirection::Downward,
        }
    }
}

impl Track {
    pub fn new(length: f64, direction: TrackDirection) -> Self {
        let length = if length.is_finite() && length > 0.0 {
            length
        } else {
            DEFAULT_TRACK_LENGTH
        };
        Self { length, direction }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn direction(&self) -> TrackDirection {
        self.direction
    }

    pub fn offset_for(&self, proficiency: u8) -> f64 {
        f64::from(proficiency.min(MAX_PROFICIENCY)) * self.length / 100.0
    }

    /// Unsnapped percentage for an offset, rounded to an integer.
    pub fn proficiency_at(&self, offset: f64) -> u8 {
        let pct = (offset.clamp(0.0, self.length) / self.length * 100.0).round();
        clamp_proficiency(pct as i32)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragSession {
    pub start_pointer: f64,
    pub start_offset: f64,
    pub last_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Tentative position during a drag; for rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragFrame {
    pub offset: f64,
    pub proficiency: u8,
}

impl DragFrame {
    pub fn reading(&self, locale: Locale) -> Reading {
        Reading::new(self.proficiency as i32, locale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub skill: String,
    pub proficiency: u8,
}

/// Drag-driven input for one skill.
///
/// `Idle --begin--> Dragging --update*--> Dragging --end|cancel--> Idle`.
/// Out-of-order calls are no-ops. The only write path into the
/// [`SkillStore`] is [`ProficiencyControl::end_drag`].
#[derive(Debug, Clone)]
pub struct ProficiencyControl {
    skill: String,
    track: Track,
    state: DragState,
}

impl ProficiencyControl {
    pub fn new(skill: impl Into<String>, track: Track) -> Self {
        Self {
            skill: skill.into(),
            track,
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Current tentative frame, if a drag is in progress.
    pub fn frame(&self) -> Option<DragFrame> {
        match self.state {
            DragState::Dragging(session) => Some(self.frame_at(session.last_offset)),
            DragState::Idle => None,
        }
    }

    /// Starts a gesture at `pointer`. Returns `false` if one is already active.
    pub fn begin_drag<S: SkillStore + ?Sized>(&mut self, store: &S, pointer: f64) -> bool {
        if self.is_dragging() {
            tracing::debug!(skill = %self.skill, "begin_drag ignored: already dragging");
            return false;
        }
        if !pointer.is_finite() {
            tracing::debug!(skill = %self.skill, "begin_drag ignored: non-finite pointer");
            return false;
        }

        let committed = store.proficiency(&self.skill).unwrap_or(0);
        let start_offset = self.track.offset_for(committed);
        self.state = DragState::Dragging(DragSession {
            start_pointer: pointer,
            start_offset,
            last_offset: start_offset,
        });
        true
    }

    pub fn update_drag(&mut self, pointer: f64) -> Option<DragFrame> {
        let DragState::Dragging(ref mut session) = self.state else {
            tracing::debug!(skill = %self.skill, "update_drag ignored: not dragging");
            return None;
        };
        if !pointer.is_finite() {
            return None;
        }

        let delta = (pointer - session.start_pointer) * self.track.direction.sign();
        session.last_offset = self.track.clamp(session.start_offset + delta);
        let offset = session.last_offset;
        Some(self.frame_at(offset))
    }

    /// Finishes the gesture and commits the snapped value to `store`.
    ///
    /// Returns `Ok(None)` when no drag was active. The control is back in
    /// `Idle` even if the store rejects the commit.
    pub fn end_drag<S: SkillStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<Commit>, SkillStoreError> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            tracing::debug!(skill = %self.skill, "end_drag ignored: not dragging");
            return Ok(None);
        };

        let pct = self.track.proficiency_at(session.last_offset);
        let snapped = snap_to_bucket(pct as i32);
        store.commit(&self.skill, snapped)?;

        Ok(Some(Commit {
            skill: self.skill.clone(),
            proficiency: snapped,
        }))
    }

    /// Aborts the gesture without committing. Returns whether one was active.
    pub fn cancel_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    fn frame_at(&self, offset: f64) -> DragFrame {
        DragFrame {
            offset,
            proficiency: self.track.proficiency_at(offset),
        }
    }
}
