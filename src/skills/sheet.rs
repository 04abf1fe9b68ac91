use serde::Serialize;

use super::types::{Skill, SkillCategory};
use crate::proficiency::{is_bucket, snap_to_bucket, MAX_PROFICIENCY};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillStoreError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Skill listed more than once: {0}")]
    DuplicateSkill(String),

    #[error("Invalid proficiency {value} for '{skill}': expected 0-100 in steps of 10")]
    InvalidProficiency { skill: String, value: u8 },
}

/// Named skill proficiencies a [`crate::proficiency::ProficiencyControl`] reads
/// from and commits into.
pub trait SkillStore {
    fn proficiency(&self, name: &str) -> Option<u8>;

    /// Replaces one named entry's value.
    fn commit(&mut self, name: &str, proficiency: u8) -> Result<(), SkillStoreError>;
}

/// The ten skills of one designer, always in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSheet {
    skills: Vec<Skill>,
}

impl Default for SkillSheet {
    fn default() -> Self {
        Self {
            skills: SkillCategory::ALL
                .iter()
                .map(|c| Skill::new(c.name(), 0))
                .collect(),
        }
    }
}

impl SkillSheet {
    /// Bulk load. Names may be canonical or Norwegian; missing categories
    /// start at 0 and values are snapped to the nearest 10 %.
    pub fn from_skills(skills: Vec<Skill>) -> Result<Self, SkillStoreError> {
        let mut sheet = Self::default();
        let mut seen = [false; SkillCategory::ALL.len()];

        for skill in skills {
            let category = SkillCategory::from_name(&skill.name)
                .ok_or_else(|| SkillStoreError::UnknownSkill(skill.name.clone()))?;
            let idx = category.index();
            if seen[idx] {
                return Err(SkillStoreError::DuplicateSkill(category.name().to_string()));
            }
            if skill.proficiency > MAX_PROFICIENCY {
                return Err(SkillStoreError::InvalidProficiency {
                    skill: skill.name,
                    value: skill.proficiency,
                });
            }
            seen[idx] = true;
            sheet.skills[idx].proficiency = snap_to_bucket(skill.proficiency as i32);
        }

        Ok(sheet)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn get(&self, category: SkillCategory) -> u8 {
        self.skills[category.index()].proficiency
    }
}

impl SkillStore for SkillSheet {
    fn proficiency(&self, name: &str) -> Option<u8> {
        SkillCategory::from_name(name).map(|c| self.get(c))
    }

    fn commit(&mut self, name: &str, proficiency: u8) -> Result<(), SkillStoreError> {
        let category = SkillCategory::from_name(name)
            .ok_or_else(|| SkillStoreError::UnknownSkill(name.to_string()))?;
        if !is_bucket(proficiency as i32) {
            return Err(SkillStoreError::InvalidProficiency {
                skill: category.name().to_string(),
                value: proficiency,
            });
        }
        self.skills[category.index()].proficiency = proficiency;
        Ok(())
    }
}
