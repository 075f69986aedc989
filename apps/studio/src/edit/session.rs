//! The live preview session: a local mirror of the host-owned document,
//! wired to the renderer, the layout signal, and the edit router.
//!
//! Convergence rules:
//! - A committed inline edit is authoritative immediately: it lands in the
//!   local mirror first and is then pushed to the host through the
//!   `DocumentSink`, so both sides converge on the same object.
//! - If the host later supplies a whole new document (a form edit, an AI
//!   enhancement finishing), that object wins outright — replacement is at
//!   the object level, never a field-by-field merge.

use std::sync::Arc;

use tracing::debug;

use crate::edit::router::apply_edit;
use crate::layout::{compose, measure, LayoutSignal, Measurement, PageFrame, PageMetrics};
use crate::model::{Document, FieldAddress, TemplateVariant};
use crate::render::{RenderOptions, RenderTree, TemplateRegistry};

/// Host-side receiver for "document changed" events. The host keeps the
/// source of truth; the session only proposes updates.
pub trait DocumentSink: Send + Sync {
    fn document_changed(&self, document: &Document);
}

/// A sink for hosts that poll the session instead of listening.
pub struct NullSink;

impl DocumentSink for NullSink {
    fn document_changed(&self, _document: &Document) {}
}

pub struct PreviewSession {
    document: Document,
    variant: TemplateVariant,
    edit_mode: bool,
    registry: Arc<TemplateRegistry>,
    page: PageMetrics,
    layout: LayoutSignal,
    sink: Arc<dyn DocumentSink>,
    last_measurement: Option<Measurement>,
}

impl PreviewSession {
    pub fn new(
        document: Document,
        variant: TemplateVariant,
        registry: Arc<TemplateRegistry>,
        sink: Arc<dyn DocumentSink>,
    ) -> Self {
        let variant = variant.clamp_to(document.kind());
        let layout = LayoutSignal::new();
        layout.mark();
        PreviewSession {
            document,
            variant,
            edit_mode: false,
            registry,
            page: PageMetrics::default(),
            layout,
            sink,
            last_measurement: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        if self.edit_mode != edit_mode {
            self.edit_mode = edit_mode;
            // Annotation changes don't move layout, but the tree changes.
            self.layout.mark();
        }
    }

    /// Switches the visual template. Unknown or wrong-kind variants fall back
    /// to the kind's default.
    pub fn set_variant(&mut self, variant: TemplateVariant) {
        let variant = variant.clamp_to(self.document.kind());
        if self.variant != variant {
            self.variant = variant;
            self.layout.mark();
        }
    }

    /// Renders the current mirror under the active variant at preview scale.
    pub fn render(&self) -> RenderTree {
        self.registry.render(
            &self.document,
            self.variant,
            &RenderOptions {
                edit_mode: self.edit_mode,
                scale: 1.0,
            },
        )
    }

    /// Commits one inline edit: routes it into the mirror, notifies the
    /// host, and marks the layout dirty. A routing miss still produces a
    /// (deep-equal) document and is not surfaced to the user.
    pub fn commit_edit(&mut self, address: &FieldAddress, new_value: &str) {
        debug!(address = %address, "committing inline edit");
        self.document = apply_edit(&self.document, address, new_value);
        self.sink.document_changed(&self.document);
        self.layout.mark();
    }

    /// Accepts a replacement document from the host. The supplied object wins
    /// outright over the local mirror.
    pub fn replace_document(&mut self, document: Document) {
        self.variant = self.variant.clamp_to(document.kind());
        self.document = document;
        self.layout.mark();
    }

    /// Runs one layout cycle: re-measures only if something marked the
    /// layout dirty since the last cycle, so a burst of edits costs one
    /// measurement pass.
    pub fn refresh_layout(&mut self) -> &Measurement {
        if self.layout.take() || self.last_measurement.is_none() {
            let tree = self.render();
            self.last_measurement = Some(measure(&tree, &self.page));
        }
        self.last_measurement
            .as_ref()
            .expect("measurement populated by the branch above")
    }

    /// Fixed-size page frames for the print preview.
    pub fn page_frames(&mut self) -> Vec<PageFrame> {
        let page = self.page.clone();
        let measurement = self.refresh_layout();
        compose(measurement, &page)
    }

    /// How many measurement passes have run; exposed for coalescing tests.
    pub fn layout_generation(&self) -> u64 {
        self.layout.generation()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
