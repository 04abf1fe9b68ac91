use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::skills::{Skill, SkillSheet, SkillStoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designer {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The one accepted skill-list shape: `{ "skills": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssessmentPayload {
    pub skills: Vec<Skill>,
}

impl AssessmentPayload {
    pub fn into_sheet(self) -> Result<SkillSheet, SkillStoreError> {
        SkillSheet::from_skills(self.skills)
    }
}

/// A saved snapshot of a designer's ten skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub skills: SkillSheet,
    pub timestamp: DateTime<Utc>,
}

/// On-disk form of an [`Assessment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StoredAssessment {
    pub skills: Vec<Skill>,
    pub timestamp: DateTime<Utc>,
}

impl From<&Assessment> for StoredAssessment {
    fn from(assessment: &Assessment) -> Self {
        Self {
            skills: assessment.skills.skills().to_vec(),
            timestamp: assessment.timestamp,
        }
    }
}

impl TryFrom<StoredAssessment> for Assessment {
    type Error = SkillStoreError;

    fn try_from(stored: StoredAssessment) -> Result<Self, Self::Error> {
        Ok(Self {
            skills: SkillSheet::from_skills(stored.skills)?,
            timestamp: stored.timestamp,
        })
    }
}
