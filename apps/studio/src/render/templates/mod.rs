//! The built-in template set: four résumé layouts and two cover-letter
//! layouts, all rendering through the shared `RenderTree` vocabulary.

mod letter;
mod resume;

use std::sync::Arc;

use crate::model::{FieldAddress, PersonalInfo};
use crate::render::registry::TemplateRenderer;
use crate::render::tree::Span;

pub use letter::{CompactTemplate, FormalTemplate};
pub use resume::{ClassicTemplate, HackerTemplate, OperatorTemplate, ResearcherTemplate};

/// Every built-in renderer, one per member of the closed variant set.
pub fn builtins() -> Vec<Arc<dyn TemplateRenderer>> {
    vec![
        Arc::new(HackerTemplate),
        Arc::new(ResearcherTemplate),
        Arc::new(OperatorTemplate),
        Arc::new(ClassicTemplate),
        Arc::new(FormalTemplate),
        Arc::new(CompactTemplate),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Shared span builders
// ────────────────────────────────────────────────────────────────────────────

/// Binds `text` to `address` only in edit mode; read-only spans carry no
/// address at all.
pub(crate) fn field(edit: bool, text: &str, address: FieldAddress) -> Span {
    if edit {
        Span::bound(text, address)
    } else {
        Span::plain(text)
    }
}

/// Name spans, first and last name separately addressable.
pub(crate) fn name_spans(edit: bool, p: &PersonalInfo) -> Vec<Span> {
    vec![
        field(edit, &p.first_name, FieldAddress::scalar("first_name")),
        field(edit, &p.last_name, FieldAddress::scalar("last_name")),
    ]
}

/// The one-line contact row shared by several templates.
pub(crate) fn contact_spans(edit: bool, p: &PersonalInfo) -> Vec<Span> {
    vec![
        field(edit, &p.email, FieldAddress::scalar("email")),
        field(edit, &p.phone, FieldAddress::scalar("phone")),
        field(edit, &p.city, FieldAddress::scalar("city")),
        field(edit, &p.country, FieldAddress::scalar("country")),
    ]
}
