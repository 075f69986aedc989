//! Closed-set variant dispatch.
//!
//! The registry maps every `TemplateVariant` to a renderer and is validated
//! exhaustively at construction: a variant key without an implementation
//! fails `with_builtins()` loudly instead of silently rendering nothing at
//! request time. Unknown or wrong-kind variants resolve to the per-kind
//! default before lookup.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::bail;
use tracing::warn;

use crate::model::{Document, TemplateVariant};
use crate::render::templates;
use crate::render::tree::{RenderOptions, RenderTree};

/// A pure mapping from (document, options) to a render tree for one variant.
pub trait TemplateRenderer: Send + Sync {
    /// The variant this renderer implements.
    fn variant(&self) -> TemplateVariant;

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree;
}

pub struct TemplateRegistry {
    renderers: HashMap<TemplateVariant, Arc<dyn TemplateRenderer>>,
}

impl TemplateRegistry {
    /// Builds the registry with the built-in template set and validates it
    /// against the closed variant list.
    pub fn with_builtins() -> anyhow::Result<Self> {
        let mut registry = TemplateRegistry {
            renderers: HashMap::new(),
        };
        for renderer in templates::builtins() {
            registry.register(renderer);
        }
        registry.validate()?;
        Ok(registry)
    }

    fn register(&mut self, renderer: Arc<dyn TemplateRenderer>) {
        let variant = renderer.variant();
        if self.renderers.insert(variant, renderer).is_some() {
            warn!(variant = variant.key(), "renderer registered twice, keeping the last");
        }
    }

    /// Startup check: every member of the closed variant set must have a
    /// renderer.
    pub fn validate(&self) -> anyhow::Result<()> {
        for variant in TemplateVariant::ALL {
            if !self.renderers.contains_key(&variant) {
                bail!(
                    "template variant '{}' has no registered renderer",
                    variant.key()
                );
            }
        }
        Ok(())
    }

    /// Renders `doc` under `variant`, clamping a wrong-kind variant to the
    /// document kind's default first.
    pub fn render(&self, doc: &Document, variant: TemplateVariant, opts: &RenderOptions) -> RenderTree {
        let variant = variant.clamp_to(doc.kind());
        let renderer = self
            .renderers
            .get(&variant)
            .or_else(|| self.renderers.get(&TemplateVariant::default_for(doc.kind())));
        match renderer {
            Some(r) => r.render(doc, opts),
            // Unreachable after validate(), but never crash a render.
            None => {
                warn!(variant = variant.key(), "no renderer available, emitting empty tree");
                RenderTree {
                    kind: doc.kind(),
                    variant,
                    font: crate::layout::FontFamily::Inter,
                    scale: opts.scale,
                    edit_mode: opts.edit_mode,
                    blocks: Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CoverLetterContent, DocumentKind, LetterTemplate, ResumeContent, ResumeTemplate,
    };

    #[test]
    fn test_builtins_cover_the_closed_set() {
        let registry = TemplateRegistry::with_builtins().unwrap();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.renderers.len(), TemplateVariant::ALL.len());
    }

    #[test]
    fn test_validate_fails_on_a_gap() {
        let mut registry = TemplateRegistry::with_builtins().unwrap();
        registry
            .renderers
            .remove(&TemplateVariant::Resume(ResumeTemplate::Operator));
        let err = registry.validate().unwrap_err().to_string();
        assert!(err.contains("operator"), "error should name the gap: {err}");
    }

    #[test]
    fn test_wrong_kind_variant_clamps_to_default() {
        let registry = TemplateRegistry::with_builtins().unwrap();
        let doc = Document::Resume(ResumeContent::default());
        let tree = registry.render(
            &doc,
            TemplateVariant::Letter(LetterTemplate::Formal),
            &RenderOptions::default(),
        );
        assert_eq!(tree.variant, TemplateVariant::default_for(DocumentKind::Resume));
        assert_eq!(tree.kind, DocumentKind::Resume);
    }

    #[test]
    fn test_every_variant_renders_its_own_kind() {
        let registry = TemplateRegistry::with_builtins().unwrap();
        let resume = Document::Resume(ResumeContent::default());
        let letter = Document::CoverLetter(CoverLetterContent::default());
        for variant in TemplateVariant::ALL {
            let doc = match variant.kind() {
                DocumentKind::Resume => &resume,
                DocumentKind::CoverLetter => &letter,
            };
            let tree = registry.render(doc, variant, &RenderOptions::default());
            assert_eq!(tree.variant, variant);
        }
    }
}
