//! The render tree: the platform-neutral output of a template renderer.
//!
//! A tree is a flat list of blocks in display order. Text blocks carry spans;
//! in edit mode each data-bound span carries the `FieldAddress` the edit
//! router needs to route a committed edit back into the document. The same
//! tree feeds the preview measurer, the page compositor, and the export
//! rasterizer — preview and export are one code path at different scales.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::model::{DocumentKind, FieldAddress, TemplateVariant};

// ────────────────────────────────────────────────────────────────────────────
// Spans and styles
// ────────────────────────────────────────────────────────────────────────────

/// Text size classes used by the built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    /// Document headline (the person's name).
    Title,
    /// Section heading.
    Heading,
    Body,
    /// Contact lines, dates, captions.
    Small,
}

impl TextStyle {
    /// Em size relative to the base font size.
    pub fn size_em(&self) -> f32 {
        match self {
            TextStyle::Title => 1.8,
            TextStyle::Heading => 1.25,
            TextStyle::Body => 1.0,
            TextStyle::Small => 0.85,
        }
    }
}

/// One run of text, optionally bound to a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    /// Present only when the tree was rendered in edit mode and the span maps
    /// onto exactly one scalar in the document.
    pub address: Option<FieldAddress>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            address: None,
        }
    }

    pub fn bound(text: impl Into<String>, address: FieldAddress) -> Self {
        Span {
            text: text.into(),
            address: Some(address),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// One vertically stacked unit of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Heading { style: TextStyle, spans: Vec<Span> },
    Paragraph { style: TextStyle, spans: Vec<Span> },
    /// Bulleted line, indented one bullet width.
    ListItem { spans: Vec<Span> },
    /// Remote photo asset. Only the box participates in layout; the
    /// rasterizer decides whether the host is trusted enough to encode.
    Photo { url: String, height_em: f32 },
    /// Horizontal separator.
    Rule,
    Spacer { height_em: f32 },
}

impl Block {
    /// All spans of a text-bearing block, empty for the rest.
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Heading { spans, .. }
            | Block::Paragraph { spans, .. }
            | Block::ListItem { spans } => spans,
            _ => &[],
        }
    }

    /// Visible text of the block, spans joined with single spaces.
    pub fn joined_text(&self) -> String {
        self.spans()
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether this block would put anything visible on the page.
    pub fn is_visible(&self) -> bool {
        match self {
            Block::Photo { .. } | Block::Rule => true,
            Block::Spacer { .. } => false,
            _ => !self.joined_text().is_empty(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tree
// ────────────────────────────────────────────────────────────────────────────

/// Options a renderer receives along with the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// When true, data-bound spans are annotated with field addresses.
    pub edit_mode: bool,
    /// Output scale factor. 1.0 for the on-screen preview; the export
    /// pipeline renders the same tree at its supersampling scale.
    pub scale: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            edit_mode: false,
            scale: 1.0,
        }
    }
}

/// The rendered document, ready for measuring, compositing, or rasterizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub kind: DocumentKind,
    pub variant: TemplateVariant,
    pub font: FontFamily,
    pub scale: f32,
    pub edit_mode: bool,
    pub blocks: Vec<Block>,
}

impl RenderTree {
    /// True when nothing in the tree would reach the page. The export
    /// pipeline refuses to rasterize an empty tree.
    pub fn is_empty(&self) -> bool {
        !self.blocks.iter().any(Block::is_visible)
    }

    /// All field addresses annotated in the tree, in display order.
    pub fn addresses(&self) -> Vec<&FieldAddress> {
        self.blocks
            .iter()
            .flat_map(|b| b.spans())
            .filter_map(|s| s.address.as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, ResumeTemplate};

    fn tree_with(blocks: Vec<Block>) -> RenderTree {
        RenderTree {
            kind: DocumentKind::Resume,
            variant: TemplateVariant::Resume(ResumeTemplate::Hacker),
            font: FontFamily::Inter,
            scale: 1.0,
            edit_mode: true,
            blocks,
        }
    }

    #[test]
    fn test_empty_tree_detection() {
        let tree = tree_with(vec![
            Block::Spacer { height_em: 2.0 },
            Block::Paragraph {
                style: TextStyle::Body,
                spans: vec![Span::plain("  ")],
            },
        ]);
        assert!(tree.is_empty(), "spacers and blank text are not content");
    }

    #[test]
    fn test_rule_counts_as_visible() {
        let tree = tree_with(vec![Block::Rule]);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_joined_text_skips_empty_spans() {
        let block = Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![Span::plain("Jan 2020"), Span::plain(""), Span::plain("Berlin")],
        };
        assert_eq!(block.joined_text(), "Jan 2020 Berlin");
    }

    #[test]
    fn test_addresses_collected_in_display_order() {
        let tree = tree_with(vec![
            Block::Paragraph {
                style: TextStyle::Body,
                spans: vec![Span::bound("a", FieldAddress::scalar("summary"))],
            },
            Block::ListItem {
                spans: vec![Span::bound(
                    "b",
                    FieldAddress::item(Collection::Skills, 0, "name"),
                )],
            },
        ]);
        let addrs = tree.addresses();
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0], &FieldAddress::scalar("summary"));
    }
}
