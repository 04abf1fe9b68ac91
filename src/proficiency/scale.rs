use serde::Serialize;

use crate::locale::Locale;

pub const MIN_PROFICIENCY: u8 = 0;
pub const MAX_PROFICIENCY: u8 = 100;
pub const BUCKET_STEP: u8 = 10;

/// Clamps any integer into the 0..=100 proficiency range.
pub fn clamp_proficiency(value: i32) -> u8 {
    value.clamp(MIN_PROFICIENCY as i32, MAX_PROFICIENCY as i32) as u8
}

/// Rounds to the nearest multiple of 10, halves rounding up.
pub fn snap_to_bucket(value: i32) -> u8 {
    let clamped = clamp_proficiency(value);
    (clamped + BUCKET_STEP / 2) / BUCKET_STEP * BUCKET_STEP
}

/// True when `value` is a committed-shape proficiency (0..=100, step 10).
pub fn is_bucket(value: i32) -> bool {
    (0..=MAX_PROFICIENCY as i32).contains(&value) && value % BUCKET_STEP as i32 == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    NoSkill,
    Beginner,
    Basic,
    Elementary,
    Medium,
    Moderate,
    Competent,
    Proficient,
    Advanced,
    Expert,
    Master,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 11] = [
        ProficiencyLevel::NoSkill,
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Basic,
        ProficiencyLevel::Elementary,
        ProficiencyLevel::Medium,
        ProficiencyLevel::Moderate,
        ProficiencyLevel::Competent,
        ProficiencyLevel::Proficient,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Expert,
        ProficiencyLevel::Master,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProficiencyLevel::NoSkill => "No skill",
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Basic => "Basic",
            ProficiencyLevel::Elementary => "Elementary",
            ProficiencyLevel::Medium => "Medium",
            ProficiencyLevel::Moderate => "Moderate",
            ProficiencyLevel::Competent => "Competent",
            ProficiencyLevel::Proficient => "Proficient",
            ProficiencyLevel::Advanced => "Advanced",
            ProficiencyLevel::Expert => "Expert",
            ProficiencyLevel::Master => "Master",
        }
    }

    pub fn label_nb(&self) -> &'static str {
        match self {
            ProficiencyLevel::NoSkill => "Ingen ferdighet",
            ProficiencyLevel::Beginner => "Nybegynner",
            ProficiencyLevel::Basic => "Grunnleggende",
            ProficiencyLevel::Elementary => "Elementært nivå",
            ProficiencyLevel::Medium => "Middels nivå",
            ProficiencyLevel::Moderate => "Moderat nivå",
            ProficiencyLevel::Competent => "Kompetent",
            ProficiencyLevel::Proficient => "Dyktig",
            ProficiencyLevel::Advanced => "Avansert",
            ProficiencyLevel::Expert => "Ekspert",
            ProficiencyLevel::Master => "Mester",
        }
    }

    pub fn localized(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.label(),
            Locale::Nb => self.label_nb(),
        }
    }
}

/// Maps a proficiency to its level. Bounds are inclusive upper bounds;
/// 0 is its own bucket. Out-of-range input is clamped first.
pub fn level_for(proficiency: i32) -> ProficiencyLevel {
    match clamp_proficiency(proficiency) {
        0 => ProficiencyLevel::NoSkill,
        1..=14 => ProficiencyLevel::Beginner,
        15..=24 => ProficiencyLevel::Basic,
        25..=34 => ProficiencyLevel::Elementary,
        35..=44 => ProficiencyLevel::Medium,
        45..=54 => ProficiencyLevel::Moderate,
        55..=64 => ProficiencyLevel::Competent,
        65..=74 => ProficiencyLevel::Proficient,
        75..=84 => ProficiencyLevel::Advanced,
        85..=94 => ProficiencyLevel::Expert,
        _ => ProficiencyLevel::Master,
    }
}

/// One of the 11 color stops of the proficiency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorStop {
    pub bucket: u8,
    /// Solid color used for comparison cells.
    pub swatch: &'static str,
    /// Bar background, a top-down gradient from the base tint.
    pub fill: &'static str,
    pub text: &'static str,
}

const fn stop(
    bucket: u8,
    swatch: &'static str,
    fill: &'static str,
    text: &'static str,
) -> ColorStop {
    ColorStop {
        bucket,
        swatch,
        fill,
        text,
    }
}

pub const COLOR_STOPS: [ColorStop; 11] = [
    stop(0, "#FFFFFF", "transparent", "#667EEA"),
    stop(10, "#D4DBF9", "#D4DBF9", "#C8D1F7"),
    stop(20, "#C8D1F7", "linear-gradient(180deg, #D4DBF9 0%, #C8D1F7 100%)", "#C8D1F7"),
    stop(30, "#AFBCF3", "linear-gradient(180deg, #D4DBF9 0%, #AFBCF3 100%)", "#AFBCF3"),
    stop(40, "#97A7EF", "linear-gradient(180deg, #D4DBF9 0%, #97A7EF 100%)", "#97A7EF"),
    stop(50, "#7E93EC", "linear-gradient(180deg, #D4DBF9 0%, #7E93EC 100%)", "#7E93EC"),
    stop(60, "#667EE8", "linear-gradient(180deg, #D4DBF9 0%, #667EE8 100%)", "#667EE8"),
    stop(70, "#566AC3", "linear-gradient(180deg, #D4DBF9 0%, #566AC3 100%)", "#566AC3"),
    stop(80, "#45569E", "linear-gradient(180deg, #D4DBF9 0%, #45569E 100%)", "#45569E"),
    stop(90, "#354279", "linear-gradient(180deg, #D4DBF9 0%, #354279 100%)", "#354279"),
    stop(100, "#252D54", "linear-gradient(180deg, #D4DBF9 0%, #252D54 100%)", "#252D54"),
];

/// Maps a proficiency to the color of its nearest 10 % bucket.
pub fn color_for(proficiency: i32) -> ColorStop {
    let bucket = snap_to_bucket(proficiency);
    COLOR_STOPS[(bucket / BUCKET_STEP) as usize]
}

/// Everything a renderer needs for one proficiency value.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub proficiency: u8,
    pub level: ProficiencyLevel,
    pub label: &'static str,
    pub color: ColorStop,
}

impl Reading {
    pub fn new(proficiency: i32, locale: Locale) -> Self {
        let level = level_for(proficiency);
        Self {
            proficiency: clamp_proficiency(proficiency),
            level,
            label: level.localized(locale),
            color: color_for(proficiency),
        }
    }
}

/// The full 11-bucket scale, lowest first.
pub fn scale(locale: Locale) -> Vec<Reading> {
    (0..=MAX_PROFICIENCY as i32)
        .step_by(BUCKET_STEP as usize)
        .map(|p| Reading::new(p, locale))
        .collect()
}
