pub mod catalog;
pub mod compare;
pub mod designers;
pub mod health;
pub mod pointer;

pub use catalog::*;
pub use compare::*;
pub use designers::*;
pub use health::*;
pub use pointer::*;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::skills::SkillCategory;

/// `?locale=nb` overrides the configured display language.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl LocaleQuery {
    pub fn or(&self, fallback: Locale) -> Locale {
        self.locale.unwrap_or(fallback)
    }
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid designer id: {}", raw)))
}

pub(crate) fn parse_skill(raw: &str) -> Result<SkillCategory> {
    SkillCategory::from_name(raw).ok_or_else(|| AppError::NotFound(format!("Unknown skill: {}", raw)))
}
