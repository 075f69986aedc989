//! Layout measurement: content height and derived page count.
//!
//! Measurement is pure arithmetic over the render tree and the static font
//! metric tables, so it cannot transiently fail the way a DOM read can; the
//! next marked layout cycle simply recomputes it. Results are deterministic:
//! measuring the same tree twice yields identical output.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, PageMetrics};
use crate::render::tree::{Block, RenderTree};

/// Vertical gap inserted after every block, in em.
pub const BLOCK_GAP_EM: f32 = 0.45;

/// Indent applied to bulleted list items, in em.
pub const LIST_INDENT_EM: f32 = 1.5;

/// Height of a horizontal rule, in em.
const RULE_HEIGHT_EM: f32 = 0.4;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One block placed on the unbroken content column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedBlock {
    /// Index into `RenderTree::blocks`.
    pub block: usize,
    /// Top offset from the start of the content column, in em.
    pub y_em: f32,
    pub height_em: f32,
}

/// The result of measuring one render tree against fixed page metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub content_height_em: f32,
    /// Always ≥ 1, even for empty content.
    pub page_count: u32,
    pub overflow: bool,
    pub blocks: Vec<PositionedBlock>,
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

/// Derives the page count from a content height. `max(1, ceil(H / PAGE_H))`,
/// with a small tolerance so a height exactly divisible by the page height
/// does not produce a trailing empty page.
pub fn pages_for_height(content_height_em: f32, page_height_em: f32) -> u32 {
    if content_height_em <= f32::EPSILON {
        return 1;
    }
    let ratio = content_height_em / page_height_em;
    (ratio - 1e-4).ceil().max(1.0) as u32
}

/// Measures a render tree: positions every block on an unbroken column and
/// derives the page count from the total height.
///
/// A single block taller than one page still counts toward the total height
/// normally; clipping it across frames is the compositor's job.
pub fn measure(tree: &RenderTree, page: &PageMetrics) -> Measurement {
    let metrics = get_metrics(tree.font);
    let mut blocks = Vec::with_capacity(tree.blocks.len());
    let mut cursor = 0.0_f32;

    for (index, block) in tree.blocks.iter().enumerate() {
        let height_em = match block {
            Block::Heading { style, .. } | Block::Paragraph { style, .. } => {
                let text = block.joined_text();
                if text.is_empty() {
                    0.0
                } else {
                    // Glyph widths are relative to the style size, so the
                    // usable width shrinks as the style grows.
                    let width = page.text_width_em / style.size_em();
                    let lines = metrics.line_count(&text, width) as f32;
                    lines * style.size_em() * page.line_height_em
                }
            }
            Block::ListItem { .. } => {
                let text = block.joined_text();
                if text.is_empty() {
                    0.0
                } else {
                    let width = page.text_width_em - LIST_INDENT_EM;
                    let lines = metrics.line_count(&text, width) as f32;
                    lines * page.line_height_em
                }
            }
            Block::Photo { height_em, .. } => *height_em,
            Block::Rule => RULE_HEIGHT_EM,
            Block::Spacer { height_em } => *height_em,
        };

        if height_em > 0.0 {
            blocks.push(PositionedBlock {
                block: index,
                y_em: cursor,
                height_em,
            });
            cursor += height_em + BLOCK_GAP_EM;
        }
    }

    // The trailing gap is not content.
    let content_height_em = if blocks.is_empty() {
        0.0
    } else {
        cursor - BLOCK_GAP_EM
    };
    let page_count = pages_for_height(content_height_em, page.page_height_em);

    Measurement {
        content_height_em,
        page_count,
        overflow: page_count > 1,
        blocks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;
    use crate::model::{DocumentKind, ResumeTemplate, TemplateVariant};
    use crate::render::tree::{Span, TextStyle};

    fn tree_with(blocks: Vec<Block>) -> RenderTree {
        RenderTree {
            kind: DocumentKind::Resume,
            variant: TemplateVariant::Resume(ResumeTemplate::Hacker),
            font: FontFamily::Inter,
            scale: 1.0,
            edit_mode: false,
            blocks,
        }
    }

    fn body(text: &str) -> Block {
        Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![Span::plain(text)],
        }
    }

    // ── pages_for_height ────────────────────────────────────────────────────

    #[test]
    fn test_zero_height_is_one_page() {
        assert_eq!(pages_for_height(0.0, 59.1), 1);
    }

    #[test]
    fn test_partial_page_rounds_up() {
        assert_eq!(pages_for_height(10.0, 59.1), 1);
        assert_eq!(pages_for_height(60.0, 59.1), 2);
    }

    #[test]
    fn test_exactly_divisible_height_has_no_trailing_page() {
        assert_eq!(pages_for_height(59.1, 59.1), 1);
        assert_eq!(pages_for_height(2.0 * 59.1, 59.1), 2);
    }

    #[test]
    fn test_two_and_a_half_pages_rounds_to_three() {
        // Scenario: measured height 2.5× the page height.
        assert_eq!(pages_for_height(2.5 * 59.1, 59.1), 3);
    }

    // ── measure ─────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_tree_measures_one_page() {
        let m = measure(&tree_with(vec![]), &PageMetrics::default());
        assert_eq!(m.page_count, 1);
        assert_eq!(m.content_height_em, 0.0);
        assert!(!m.overflow);
    }

    #[test]
    fn test_short_document_is_one_page() {
        // Scenario: one short summary paragraph and one experience line.
        let tree = tree_with(vec![
            body("Pragmatic backend engineer with a bias for shipping."),
            body("Led the payments platform team at Acme."),
        ]);
        let m = measure(&tree, &PageMetrics::default());
        assert_eq!(m.page_count, 1);
        assert!(!m.overflow);
    }

    #[test]
    fn test_measurement_is_idempotent() {
        let tree = tree_with(vec![body(&"lorem ipsum dolor ".repeat(30)), Block::Rule]);
        let page = PageMetrics::default();
        let first = measure(&tree, &page);
        let second = measure(&tree, &page);
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_content_overflows() {
        let blocks: Vec<Block> = (0..120)
            .map(|_| body("A line of experience detail that fills most of the width of a page."))
            .collect();
        let m = measure(&tree_with(blocks), &PageMetrics::default());
        assert!(m.page_count > 1);
        assert!(m.overflow);
    }

    #[test]
    fn test_oversized_single_block_counts_normally() {
        let page = PageMetrics::default();
        let tree = tree_with(vec![Block::Spacer {
            height_em: page.page_height_em * 1.5,
        }]);
        // Spacers are invisible but still occupy height in the column.
        let m = measure(&tree, &page);
        assert_eq!(m.page_count, 2);
    }

    #[test]
    fn test_empty_text_blocks_take_no_height() {
        let tree = tree_with(vec![body(""), body("content")]);
        let m = measure(&tree, &PageMetrics::default());
        assert_eq!(m.blocks.len(), 1);
        assert_eq!(m.blocks[0].y_em, 0.0);
    }

    #[test]
    fn test_heading_taller_than_body() {
        let page = PageMetrics::default();
        let heading = tree_with(vec![Block::Heading {
            style: TextStyle::Heading,
            spans: vec![Span::plain("Experience")],
        }]);
        let para = tree_with(vec![body("Experience")]);
        let h = measure(&heading, &page).content_height_em;
        let p = measure(&para, &page).content_height_em;
        assert!(h > p);
    }
}
