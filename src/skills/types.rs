use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::locale::Locale;

/// The ten fixed skill categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    BusinessAnalysis,
    UserInsight,
    GraphicDesign,
    ContentDesign,
    InteractionDesign,
    InformationArchitecture,
    UserTesting,
    FrontendDesign,
    Prototyping,
    DataAnalysis,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 10] = [
        SkillCategory::BusinessAnalysis,
        SkillCategory::UserInsight,
        SkillCategory::GraphicDesign,
        SkillCategory::ContentDesign,
        SkillCategory::InteractionDesign,
        SkillCategory::InformationArchitecture,
        SkillCategory::UserTesting,
        SkillCategory::FrontendDesign,
        SkillCategory::Prototyping,
        SkillCategory::DataAnalysis,
    ];

    /// URL-friendly identifier, matching the serde form.
    pub fn key(&self) -> &'static str {
        match self {
            SkillCategory::BusinessAnalysis => "business_analysis",
            SkillCategory::UserInsight => "user_insight",
            SkillCategory::GraphicDesign => "graphic_design",
            SkillCategory::ContentDesign => "content_design",
            SkillCategory::InteractionDesign => "interaction_design",
            SkillCategory::InformationArchitecture => "information_architecture",
            SkillCategory::UserTesting => "user_testing",
            SkillCategory::FrontendDesign => "frontend_design",
            SkillCategory::Prototyping => "prototyping",
            SkillCategory::DataAnalysis => "data_analysis",
        }
    }

    /// Canonical name, used as the skill name in stored skill lists.
    pub fn name(&self) -> &'static str {
        match self {
            SkillCategory::BusinessAnalysis => "Business analysis",
            SkillCategory::UserInsight => "User insight",
            SkillCategory::GraphicDesign => "Graphic design",
            SkillCategory::ContentDesign => "Content design",
            SkillCategory::InteractionDesign => "Interaction design",
            SkillCategory::InformationArchitecture => "Information architecture",
            SkillCategory::UserTesting => "User testing",
            SkillCategory::FrontendDesign => "Frontend design & accessibility",
            SkillCategory::Prototyping => "Prototyping",
            SkillCategory::DataAnalysis => "Data & traffic analysis",
        }
    }

    pub fn name_nb(&self) -> &'static str {
        match self {
            SkillCategory::BusinessAnalysis => "Forretnings-analyse",
            SkillCategory::UserInsight => "Brukerinnsikt",
            SkillCategory::GraphicDesign => "Grafisk design",
            SkillCategory::ContentDesign => "Innholds-design",
            SkillCategory::InteractionDesign => "Interaksjons-design",
            SkillCategory::InformationArchitecture => "Informasjons-arkitektur",
            SkillCategory::UserTesting => "Brukertesting",
            SkillCategory::FrontendDesign => "Frontend design, UU",
            SkillCategory::Prototyping => "Prototyping",
            SkillCategory::DataAnalysis => "Data og trafikkanalyse",
        }
    }

    pub fn localized(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name(),
            Locale::Nb => self.name_nb(),
        }
    }

    /// Position in [`SkillCategory::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolves a key, canonical name or Norwegian name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.key() == lowered
                || c.name().to_lowercase() == lowered
                || c.name_nb().to_lowercase() == lowered
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    pub proficiency: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>, proficiency: u8) -> Self {
        Self {
            name: name.into(),
            proficiency,
        }
    }
}

pub const MAX_DESIGNER_NAME_LEN: usize = 100;

static DESIGNER_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_designer_name_regex() -> &'static Regex {
    // No control characters anywhere in the name
    DESIGNER_NAME_REGEX.get_or_init(|| Regex::new(r"^[^\p{Cc}]+$").expect("valid regex"))
}

/// Validates a designer name and returns it trimmed:
/// - Not empty after trimming
/// - At most 100 characters
/// - No control characters
pub fn validate_designer_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Designer name cannot be empty".to_string());
    }

    let len = trimmed.chars().count();
    if len > MAX_DESIGNER_NAME_LEN {
        return Err(format!(
            "Designer name too long: {} characters (max {})",
            len, MAX_DESIGNER_NAME_LEN
        ));
    }

    if !get_designer_name_regex().is_match(trimmed) {
        return Err("Designer name cannot contain control characters".to_string());
    }

    Ok(trimmed.to_string())
}
