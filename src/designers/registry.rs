use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::types::{Assessment, Designer, StoredAssessment};
use crate::error::{AppError, Result};
use crate::skills::{validate_designer_name, SkillSheet};

const DESIGNER_FILE: &str = "designer.yaml";
const ASSESSMENTS_DIR: &str = "assessments";

/// Filesystem store for designers and their assessment history.
///
/// Layout: `<data_dir>/<id>/designer.yaml` and
/// `<data_dir>/<id>/assessments/<millis>.yaml`. The newest snapshot is the
/// designer's current state.
pub struct DesignerRegistry {
    data_dir: PathBuf,
    // Serializes writes so duplicate-name checks and snapshot names stay consistent
    write_lock: Mutex<()>,
}

impl DesignerRegistry {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    async fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    fn designer_path(&self, id: &Uuid) -> PathBuf {
        self.data_dir.join(id.to_string())
    }

    fn designer_file(&self, id: &Uuid) -> PathBuf {
        self.designer_path(id).join(DESIGNER_FILE)
    }

    fn assessments_dir(&self, id: &Uuid) -> PathBuf {
        self.designer_path(id).join(ASSESSMENTS_DIR)
    }

    /// List all designers, sorted by name ignoring case
    pub async fn list(&self) -> Result<Vec<Designer>> {
        self.ensure_data_dir().await?;

        let mut entries = fs::read_dir(&self.data_dir).await?;
        let mut designers = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let id = match path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| Uuid::parse_str(n).ok())
            {
                Some(id) => id,
                None => continue,
            };

            match self.get(&id).await {
                Ok(designer) => designers.push(designer),
                Err(e) => {
                    tracing::warn!(%id, error = %e, "skipping unreadable designer");
                    continue;
                }
            }
        }

        designers.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(designers)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Designer> {
        let path = self.designer_file(id);
        if !path.exists() {
            return Err(AppError::NotFound(format!("Designer '{}' not found", id)));
        }

        let content = fs::read_to_string(&path).await?;
        let designer: Designer = serde_yaml::from_str(&content)?;
        Ok(designer)
    }

    /// Register a new designer. Names are unique ignoring case.
    pub async fn create(&self, name: &str) -> Result<Designer> {
        let name = validate_designer_name(name).map_err(AppError::BadRequest)?;
        let _guard = self.write_lock.lock().await;

        self.ensure_unique_name(&name, None).await?;

        let designer = Designer {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        };

        fs::create_dir_all(self.assessments_dir(&designer.id)).await?;
        self.write_designer(&designer).await?;

        tracing::info!(id = %designer.id, name = %designer.name, "designer registered");
        Ok(designer)
    }

    pub async fn rename(&self, id: &Uuid, name: &str) -> Result<Designer> {
        let name = validate_designer_name(name).map_err(AppError::BadRequest)?;
        let _guard = self.write_lock.lock().await;

        let mut designer = self.get(id).await?;
        self.ensure_unique_name(&name, Some(id)).await?;

        designer.name = name;
        self.write_designer(&designer).await?;

        tracing::info!(id = %designer.id, name = %designer.name, "designer renamed");
        Ok(designer)
    }

    /// Delete a designer together with all saved assessments
    pub async fn delete(&self, id: &Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let path = self.designer_path(id);
        if !self.designer_file(id).exists() {
            return Err(AppError::NotFound(format!("Designer '{}' not found", id)));
        }

        fs::remove_dir_all(&path).await?;
        tracing::info!(%id, "designer deleted");
        Ok(())
    }

    /// All snapshots, newest first
    pub async fn assessments(&self, id: &Uuid) -> Result<Vec<Assessment>> {
        self.get(id).await?;

        let mut assessments = Vec::new();
        for path in self.snapshot_files(id).await?.into_iter().rev() {
            assessments.push(self.read_snapshot(&path).await?);
        }
        Ok(assessments)
    }

    pub async fn latest_assessment(&self, id: &Uuid) -> Result<Option<Assessment>> {
        self.get(id).await?;

        match self.snapshot_files(id).await?.last() {
            Some(path) => Ok(Some(self.read_snapshot(path).await?)),
            None => Ok(None),
        }
    }

    /// The designer's current skills, or all zeros if nothing is saved yet
    pub async fn sheet(&self, id: &Uuid) -> Result<SkillSheet> {
        Ok(self
            .latest_assessment(id)
            .await?
            .map(|a| a.skills)
            .unwrap_or_default())
    }

    /// Store a new snapshot and return it
    pub async fn save_assessment(&self, id: &Uuid, sheet: SkillSheet) -> Result<Assessment> {
        let _guard = self.write_lock.lock().await;
        self.get(id).await?;
        self.write_snapshot(id, sheet).await
    }

    /// Read-modify-write of the current sheet under the write lock.
    ///
    /// `apply` returns whether it changed anything; only then is a new
    /// snapshot written and returned.
    pub async fn update_sheet<F>(&self, id: &Uuid, apply: F) -> Result<Option<Assessment>>
    where
        F: FnOnce(&mut SkillSheet) -> Result<bool>,
    {
        let _guard = self.write_lock.lock().await;
        let mut sheet = self.sheet(id).await?;

        if !apply(&mut sheet)? {
            return Ok(None);
        }
        Ok(Some(self.write_snapshot(id, sheet).await?))
    }

    async fn write_snapshot(&self, id: &Uuid, sheet: SkillSheet) -> Result<Assessment> {
        let dir = self.assessments_dir(id);
        fs::create_dir_all(&dir).await?;

        let assessment = Assessment {
            skills: sheet,
            timestamp: Utc::now(),
        };

        // Snapshot names sort chronologically; bump on a same-millisecond save
        let mut stamp = assessment.timestamp.timestamp_millis().max(0);
        let path = loop {
            let candidate = dir.join(format!("{:016}.yaml", stamp));
            if !candidate.exists() {
                break candidate;
            }
            stamp += 1;
        };

        let yaml = serde_yaml::to_string(&StoredAssessment::from(&assessment))?;
        fs::write(&path, yaml).await?;

        tracing::debug!(%id, file = %path.display(), "assessment saved");
        Ok(assessment)
    }

    async fn ensure_unique_name(&self, name: &str, except: Option<&Uuid>) -> Result<()> {
        let lowered = name.to_lowercase();
        let taken = self
            .list()
            .await?
            .into_iter()
            .any(|d| Some(&d.id) != except && d.name.to_lowercase() == lowered);

        if taken {
            return Err(AppError::Conflict(format!(
                "A designer named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    async fn write_designer(&self, designer: &Designer) -> Result<()> {
        let yaml = serde_yaml::to_string(designer)?;
        fs::write(self.designer_file(&designer.id), yaml).await?;
        Ok(())
    }

    /// Snapshot files sorted oldest first
    async fn snapshot_files(&self, id: &Uuid) -> Result<Vec<PathBuf>> {
        let dir = self.assessments_dir(id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn read_snapshot(&self, path: &Path) -> Result<Assessment> {
        let content = fs::read_to_string(path).await?;
        let stored: StoredAssessment = serde_yaml::from_str(&content)?;
        let assessment = Assessment::try_from(stored).map_err(|e| {
            AppError::Internal(format!("Corrupt assessment {}: {}", path.display(), e))
        })?;
        Ok(assessment)
    }
}
