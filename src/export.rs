//! Printable documents for a single assessment, a comparison and the full
//! designer list. Documents are Markdown; turning them into PDF is left to
//! whatever prints them.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::comparison::Comparison;
use crate::designers::{Assessment, Designer};
use crate::locale::Locale;
use crate::proficiency::{Reading, BUCKET_STEP, MAX_PROFICIENCY};
use crate::skills::{SkillCategory, SkillSheet};

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub exported_at: DateTime<Utc>,
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

struct Text {
    assessment_title: &'static str,
    comparison_title: &'static str,
    all_title: &'static str,
    exported: &'static str,
    assessed: &'static str,
    not_assessed: &'static str,
    instructions: &'static str,
    skill: &'static str,
    proficiency: &'static str,
    level: &'static str,
    no_designers: &'static str,
}

const EN: Text = Text {
    assessment_title: "Self-assessment",
    comparison_title: "Designer comparison",
    all_title: "All self-assessments",
    exported: "Exported",
    assessed: "Assessed",
    not_assessed: "No saved assessment",
    instructions: "Which parts of user experience design do you master? Drag the bars to set your skill level.",
    skill: "Skill",
    proficiency: "Proficiency",
    level: "Level",
    no_designers: "No designers registered.",
};

const NB: Text = Text {
    assessment_title: "Egenevaluering",
    comparison_title: "Sammenligning av designere",
    all_title: "Alle egenevalueringer",
    exported: "Eksportert",
    assessed: "Evaluert",
    not_assessed: "Ingen lagret evaluering",
    instructions: "Hvilke deler av brukeropplevelsesdesign behersker du. Dra i stolpene for å angi ferdighetsnivå.",
    skill: "Ferdighet",
    proficiency: "Nivå i prosent",
    level: "Nivå",
    no_designers: "Ingen designere registrert.",
};

fn text(locale: Locale) -> &'static Text {
    match locale {
        Locale::En => &EN,
        Locale::Nb => &NB,
    }
}

fn format_time(at: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::En => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        Locale::Nb => at.format("%d.%m.%Y, %H:%M").to_string(),
    }
}

static NON_ALNUM_REGEX: OnceLock<Regex> = OnceLock::new();

/// `<title with every non-ASCII-alphanumeric replaced by '_', lowercased>_<millis>.md`
pub fn file_name(title: &str, at: &DateTime<Utc>) -> String {
    let regex = NON_ALNUM_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
    let stem = regex.replace_all(title, "_").to_lowercase();
    format!("{}_{}.md", stem, at.timestamp_millis())
}

/// Escapes text for a Markdown table cell or heading.
fn md_cell(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|")
}

/// Ten-cell text bar, one cell per 10 %.
fn bar(proficiency: u8) -> String {
    let cells = (MAX_PROFICIENCY / BUCKET_STEP) as usize;
    let filled = ((proficiency.min(MAX_PROFICIENCY) / BUCKET_STEP) as usize).min(cells);
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

fn document(title: String, body: String, at: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        file_name: file_name(&title, &at),
        title,
        exported_at: at,
        content_type: "text/markdown; charset=utf-8",
        body,
    }
}

fn write_header(out: &mut String, title: &str, at: &DateTime<Utc>, locale: Locale) {
    let t = text(locale);
    let _ = writeln!(out, "# {}\n", md_cell(title));
    let _ = writeln!(out, "{}: {}\n", t.exported, format_time(at, locale));
}

fn write_sheet(
    out: &mut String,
    designer: &Designer,
    assessment: Option<&Assessment>,
    heading_level: usize,
    locale: Locale,
) {
    let t = text(locale);
    if heading_level > 0 {
        let _ = writeln!(out, "{} {}\n", "#".repeat(heading_level), md_cell(&designer.name));
    }

    match assessment {
        Some(a) => {
            let _ = writeln!(out, "{}: {}\n", t.assessed, format_time(&a.timestamp, locale));
        }
        None => {
            let _ = writeln!(out, "_{}_\n", t.not_assessed);
        }
    }

    let empty = SkillSheet::default();
    let sheet = assessment.map(|a| &a.skills).unwrap_or(&empty);

    let _ = writeln!(out, "| {} | {} | | {} |", t.skill, t.proficiency, t.level);
    let _ = writeln!(out, "|---|---:|---|---|");
    for category in SkillCategory::ALL {
        let reading = Reading::new(sheet.get(category) as i32, locale);
        let _ = writeln!(
            out,
            "| {} | {}% | {} | {} |",
            category.localized(locale),
            reading.proficiency,
            bar(reading.proficiency),
            reading.label
        );
    }
    out.push('\n');
}

pub fn assessment_document(
    designer: &Designer,
    assessment: Option<&Assessment>,
    locale: Locale,
    at: DateTime<Utc>,
) -> ExportDocument {
    let t = text(locale);
    let title = format!("{}: {}", t.assessment_title, designer.name);

    let mut body = String::new();
    write_header(&mut body, &title, &at, locale);
    let _ = writeln!(body, "{}\n", t.instructions);
    write_sheet(&mut body, designer, assessment, 0, locale);

    document(title, body, at)
}

pub fn all_assessments_document(
    entries: &[(Designer, Option<Assessment>)],
    locale: Locale,
    at: DateTime<Utc>,
) -> ExportDocument {
    let t = text(locale);
    let title = t.all_title.to_string();

    let mut body = String::new();
    write_header(&mut body, &title, &at, locale);
    if entries.is_empty() {
        let _ = writeln!(body, "{}", t.no_designers);
    }
    for (designer, assessment) in entries {
        write_sheet(&mut body, designer, assessment.as_ref(), 2, locale);
    }

    document(title, body, at)
}

pub fn comparison_document(comparison: &Comparison, locale: Locale, at: DateTime<Utc>) -> ExportDocument {
    let t = text(locale);
    let title = t.comparison_title.to_string();

    let mut body = String::new();
    write_header(&mut body, &title, &at, locale);

    let _ = write!(body, "| {} |", t.skill);
    for column in &comparison.designers {
        let _ = write!(body, " {} |", md_cell(&column.name));
    }
    body.push('\n');
    body.push_str("|---|");
    for _ in &comparison.designers {
        body.push_str("---:|");
    }
    body.push('\n');

    for row in &comparison.rows {
        let _ = write!(body, "| {} |", row.label);
        for cell in &row.cells {
            let _ = write!(body, " {}% |", cell.reading.proficiency);
        }
        body.push('\n');
    }

    document(title, body, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillStore;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    fn kari() -> Designer {
        Designer {
            id: Uuid::new_v4(),
            name: "Kari Nordmann".into(),
            created_at: at(),
        }
    }

    fn kari_assessment() -> Assessment {
        let mut skills = SkillSheet::default();
        skills.commit("Prototyping", 80).unwrap();
        Assessment {
            skills,
            timestamp: at(),
        }
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let name = file_name("Self-assessment: Kari Nordmann", &at());
        assert_eq!(
            name,
            format!("self_assessment__kari_nordmann_{}.md", at().timestamp_millis())
        );
        let name = file_name("Egenevaluering: Åse", &at());
        assert!(name.starts_with("egenevaluering___se_"));
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0), "░░░░░░░░░░");
        assert_eq!(bar(30), "███░░░░░░░");
        assert_eq!(bar(100), "██████████");
    }

    #[test]
    fn test_assessment_document() {
        let doc = assessment_document(&kari(), Some(&kari_assessment()), Locale::En, at());
        assert_eq!(doc.title, "Self-assessment: Kari Nordmann");
        assert!(doc.body.starts_with("# Self-assessment: Kari Nordmann"));
        assert!(doc.body.contains("Exported: 2024-03-05 14:30 UTC"));
        assert!(doc.body.contains("| Prototyping | 80% | ████████░░ | Advanced |"));
        assert!(doc.body.contains("| Graphic design | 0% | ░░░░░░░░░░ | No skill |"));
        assert!(doc.file_name.ends_with(".md"));
    }

    #[test]
    fn test_assessment_document_norwegian() {
        let doc = assessment_document(&kari(), None, Locale::Nb, at());
        assert_eq!(doc.title, "Egenevaluering: Kari Nordmann");
        assert!(doc.body.contains("Eksportert: 05.03.2024, 14:30"));
        assert!(doc.body.contains("Ingen lagret evaluering"));
        assert!(doc.body.contains("| Grafisk design | 0% |"));
    }

    #[test]
    fn test_all_assessments_document() {
        let ola = Designer {
            id: Uuid::new_v4(),
            name: "Ola".into(),
            created_at: at(),
        };
        let entries = vec![(kari(), Some(kari_assessment())), (ola, None)];
        let doc = all_assessments_document(&entries, Locale::En, at());
        assert!(doc.body.contains("## Kari Nordmann"));
        assert!(doc.body.contains("## Ola"));
        assert!(doc.body.contains("_No saved assessment_"));

        let empty = all_assessments_document(&[], Locale::En, at());
        assert!(empty.body.contains("No designers registered."));
    }

    #[test]
    fn test_comparison_document() {
        let entries = vec![(kari(), Some(kari_assessment()))];
        let comparison = Comparison::build(&entries, Locale::En);
        let doc = comparison_document(&comparison, Locale::En, at());
        assert_eq!(doc.title, "Designer comparison");
        assert!(doc.body.contains("| Skill | Kari Nordmann |"));
        assert!(doc.body.contains("| Prototyping | 80% |"));
        assert_eq!(doc.body.lines().filter(|l| l.starts_with("| ")).count(), 11);
    }

    fn unescaped_pipes(line: &str) -> usize {
        line.matches('|').count() - line.matches("\\|").count()
    }

    #[test]
    fn test_pipe_in_designer_name_keeps_table_shape() {
        let designer = Designer {
            name: "Kari | Ola".into(),
            ..kari()
        };
        let entries = vec![(designer, Some(kari_assessment()))];

        let comparison = Comparison::build(&entries, Locale::En);
        let doc = comparison_document(&comparison, Locale::En, at());
        let mut lines = doc.body.lines().filter(|l| l.starts_with('|'));
        let header = lines.next().unwrap();
        let separator = lines.next().unwrap();
        assert_eq!(header, "| Skill | Kari \\| Ola |");
        assert_eq!(unescaped_pipes(header), unescaped_pipes(separator));
        for row in lines {
            assert_eq!(unescaped_pipes(row), unescaped_pipes(separator));
        }

        let doc = all_assessments_document(&entries, Locale::En, at());
        assert!(doc.body.contains("## Kari \\| Ola\n"));
        assert_eq!(doc.title, "All self-assessments");
    }
}
