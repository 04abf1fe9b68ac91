use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::designers::{Assessment, Designer, DesignerRegistry};
use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::proficiency::Reading;
use crate::skills::{SkillCategory, SkillSheet};

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonColumn {
    pub id: Uuid,
    pub name: String,
    pub assessed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonCell {
    pub designer_id: Uuid,
    #[serde(flatten)]
    pub reading: Reading,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub skill: &'static str,
    pub label: &'static str,
    pub cells: Vec<ComparisonCell>,
}

/// Skill-by-designer table. Rows follow the canonical category order,
/// cells follow the column order.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub designers: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Designers without an assessment compare as all zeros.
    pub fn build(entries: &[(Designer, Option<Assessment>)], locale: Locale) -> Self {
        let designers = entries
            .iter()
            .map(|(d, a)| ComparisonColumn {
                id: d.id,
                name: d.name.clone(),
                assessed_at: a.as_ref().map(|a| a.timestamp),
            })
            .collect();

        let empty = SkillSheet::default();
        let rows = SkillCategory::ALL
            .iter()
            .map(|category| ComparisonRow {
                skill: category.name(),
                label: category.localized(locale),
                cells: entries
                    .iter()
                    .map(|(d, a)| {
                        let sheet = a.as_ref().map(|a| &a.skills).unwrap_or(&empty);
                        ComparisonCell {
                            designer_id: d.id,
                            reading: Reading::new(sheet.get(*category) as i32, locale),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { designers, rows }
    }
}

/// Loads the latest assessment of each selected designer.
///
/// Ids keep request order; repeats are collapsed. Unknown ids fail the
/// whole request.
pub async fn load_entries(
    registry: &DesignerRegistry,
    ids: &[Uuid],
) -> Result<Vec<(Designer, Option<Assessment>)>> {
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "Select at least one designer to compare".into(),
        ));
    }

    let mut seen = Vec::with_capacity(ids.len());
    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.contains(id) {
            continue;
        }
        seen.push(*id);

        let designer = registry.get(id).await?;
        let assessment = registry.latest_assessment(id).await?;
        entries.push((designer, assessment));
    }
    Ok(entries)
}

pub async fn compare(registry: &DesignerRegistry, ids: &[Uuid], locale: Locale) -> Result<Comparison> {
    let entries = load_entries(registry, ids).await?;
    Ok(Comparison::build(&entries, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillStore;
    use tempfile::TempDir;

    fn designer(name: &str) -> Designer {
        Designer {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    fn assessment(category: SkillCategory, value: u8) -> Assessment {
        let mut skills = SkillSheet::default();
        skills.commit(category.name(), value).unwrap();
        Assessment {
            skills,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_build_shape() {
        let kari = designer("Kari");
        let ola = designer("Ola");
        let entries = vec![
            (kari.clone(), Some(assessment(SkillCategory::GraphicDesign, 70))),
            (ola.clone(), None),
        ];

        let table = Comparison::build(&entries, Locale::En);
        assert_eq!(table.designers.len(), 2);
        assert_eq!(table.designers[0].name, "Kari");
        assert!(table.designers[1].assessed_at.is_none());
        assert_eq!(table.rows.len(), 10);

        let graphic = &table.rows[SkillCategory::GraphicDesign.index()];
        assert_eq!(graphic.skill, "Graphic design");
        assert_eq!(graphic.cells[0].designer_id, kari.id);
        assert_eq!(graphic.cells[0].reading.proficiency, 70);
        assert_eq!(graphic.cells[0].reading.color.swatch, "#566AC3");
        assert_eq!(graphic.cells[1].designer_id, ola.id);
        assert_eq!(graphic.cells[1].reading.proficiency, 0);
        assert_eq!(graphic.cells[1].reading.color.swatch, "#FFFFFF");
    }

    #[test]
    fn test_build_localized_labels() {
        let entries = vec![(designer("Kari"), None)];
        let table = Comparison::build(&entries, Locale::Nb);
        assert_eq!(table.rows[0].skill, "Business analysis");
        assert_eq!(table.rows[0].label, "Forretnings-analyse");
        assert_eq!(table.rows[0].cells[0].reading.label, "Ingen ferdighet");
    }

    #[tokio::test]
    async fn test_compare_from_registry() {
        let temp = TempDir::new().unwrap();
        let registry = DesignerRegistry::new(temp.path().to_path_buf());

        let kari = registry.create("Kari").await.unwrap();
        let ola = registry.create("Ola").await.unwrap();
        let mut sheet = SkillSheet::default();
        sheet.commit("Prototyping", 90).unwrap();
        registry.save_assessment(&ola.id, sheet).await.unwrap();

        let table = compare(&registry, &[ola.id, kari.id, ola.id], Locale::En)
            .await
            .unwrap();
        assert_eq!(table.designers.len(), 2);
        assert_eq!(table.designers[0].id, ola.id);

        let row = &table.rows[SkillCategory::Prototyping.index()];
        assert_eq!(row.cells[0].reading.proficiency, 90);
        assert_eq!(row.cells[1].reading.proficiency, 0);
    }

    #[tokio::test]
    async fn test_compare_rejects_empty_and_unknown() {
        let temp = TempDir::new().unwrap();
        let registry = DesignerRegistry::new(temp.path().to_path_buf());

        assert!(matches!(
            compare(&registry, &[], Locale::En).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            compare(&registry, &[Uuid::new_v4()], Locale::En).await,
            Err(AppError::NotFound(_))
        ));
    }
}
