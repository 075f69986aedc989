//! The template-agnostic document model: the tagged résumé/cover-letter
//! union, typed field addresses for edit routing, and the closed template
//! variant sets.

pub mod address;
pub mod document;
pub mod variant;

pub use address::{Collection, FieldAddress};
pub use document::{
    CoverLetterContent, Document, DocumentKind, EducationEntry, ExperienceEntry, JobInfo,
    PersonalInfo, RecipientInfo, ResumeContent, SkillEntry,
};
pub use variant::{LetterTemplate, ResumeTemplate, TemplateVariant};
