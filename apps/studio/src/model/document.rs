//! The structured, template-agnostic document model.
//!
//! A `Document` is either a résumé or a cover letter, tagged by kind. It is
//! owned by the host application for the lifetime of an editing session; this
//! crate only reads it and proposes updates (see `edit::router`).
//!
//! Collections and nested info blocks are `Arc`-shared so that a structural
//! copy along one edited path leaves every untouched node reference-equal to
//! the original. Hosts can rely on `Arc::ptr_eq` for cheap change detection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Document kind
// ────────────────────────────────────────────────────────────────────────────

/// The two document kinds this core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "coverLetter")]
    CoverLetter,
}

impl DocumentKind {
    /// Stable string key, matching the wire-level `kind` tag.
    pub fn key(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "coverLetter",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared info blocks
// ────────────────────────────────────────────────────────────────────────────

/// Identity and contact fields shared by both document kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Optional photo asset URL. Remote hosts must be CORS-approved before
    /// export (see `export::rasterizer`).
    pub photo_url: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        name.trim().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé collections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub employer: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,
    pub level: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Cover-letter info blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInfo {
    pub company: String,
    pub manager: String,
    pub company_address: String,
    pub company_city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub position: String,
    pub reference: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Résumé payload. Collection order is display order and is preserved across
/// edits — the Edit Router never reorders or auto-extends a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub personal_info: Arc<PersonalInfo>,
    pub summary: String,
    pub experience: Vec<Arc<ExperienceEntry>>,
    pub education: Vec<Arc<EducationEntry>>,
    pub skills: Vec<Arc<SkillEntry>>,
}

/// Cover-letter payload. `body` is one top-level scalar; the renderer splits
/// it into paragraphs for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterContent {
    pub personal_info: Arc<PersonalInfo>,
    pub recipient_info: Arc<RecipientInfo>,
    pub job_info: Arc<JobInfo>,
    pub body: String,
}

/// The tagged document union. Serializes with a `kind` discriminator matching
/// the host application's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Document {
    #[serde(rename = "resume")]
    Resume(ResumeContent),
    #[serde(rename = "coverLetter")]
    CoverLetter(CoverLetterContent),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Resume(_) => DocumentKind::Resume,
            Document::CoverLetter(_) => DocumentKind::CoverLetter,
        }
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        match self {
            Document::Resume(r) => &r.personal_info,
            Document::CoverLetter(c) => &c.personal_info,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_round_trips_through_json() {
        let doc = Document::Resume(ResumeContent::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "resume");

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), DocumentKind::Resume);
    }

    #[test]
    fn test_cover_letter_kind_tag() {
        let doc = Document::CoverLetter(CoverLetterContent::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "coverLetter");
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let p = PersonalInfo {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(p.full_name(), "Ada");
    }

    #[test]
    fn test_collection_order_survives_serialization() {
        let mut content = ResumeContent::default();
        for name in ["Rust", "SQL", "Go"] {
            content.skills.push(Arc::new(SkillEntry {
                name: name.to_string(),
                level: "Expert".to_string(),
            }));
        }
        let doc = Document::Resume(content);
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        match back {
            Document::Resume(r) => {
                let names: Vec<&str> = r.skills.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["Rust", "SQL", "Go"]);
            }
            _ => panic!("expected resume"),
        }
    }
}
