//! Document studio core: live preview pagination, inline-edit routing, and
//! the PDF export pipeline for résumés and cover letters.
//!
//! The embedding host owns the widgets and the chrome; this crate owns the
//! semantics. A [`edit::PreviewSession`] holds the current document and
//! template variant, routes inline edits back into the model through typed
//! [`model::FieldAddress`]es, and re-measures layout through a coalescing
//! dirty signal. The [`export::ExportPipeline`] renders the same tree at
//! print scale and drives it through rasterization, PNG encoding, remote PDF
//! conversion, download delivery, and best-effort persistence.

pub mod config;
pub mod edit;
pub mod export;
pub mod layout;
pub mod model;
pub mod render;

pub use config::Config;
pub use edit::{apply_edit, PreviewSession};
pub use export::{ExportError, ExportPipeline, ExportReceipt, ExportRequest};
pub use layout::PageMetrics;
pub use model::{Document, DocumentKind, FieldAddress, TemplateVariant};
pub use render::TemplateRegistry;
