pub mod sheet;
pub mod types;

pub use sheet::{SkillSheet, SkillStore, SkillStoreError};
pub use types::{validate_designer_name, Skill, SkillCategory, MAX_DESIGNER_NAME_LEN};
