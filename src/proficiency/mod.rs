pub mod control;
pub mod scale;

pub use control::{
    Commit, DragFrame, DragSession, DragState, ProficiencyControl, Track, TrackDirection,
    DEFAULT_TRACK_LENGTH,
};
pub use scale::{
    clamp_proficiency, color_for, is_bucket, level_for, scale, snap_to_bucket, ColorStop,
    ProficiencyLevel, Reading, BUCKET_STEP, COLOR_STOPS, MAX_PROFICIENCY, MIN_PROFICIENCY,
};
