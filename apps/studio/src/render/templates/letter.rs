//! The two cover-letter templates.
//!
//! The letter body is one top-level scalar. It is rendered as one paragraph
//! per blank-line-separated chunk; the body is inline-editable only when it
//! is a single paragraph, because an edit to one chunk would otherwise
//! replace the whole scalar. Multi-paragraph bodies stay read-only in place
//! and are edited through the host's form instead.

use crate::layout::font_metrics::FontFamily;
use crate::model::{
    CoverLetterContent, Document, DocumentKind, FieldAddress, LetterTemplate, TemplateVariant,
};
use crate::render::registry::TemplateRenderer;
use crate::render::templates::{contact_spans, field, name_spans};
use crate::render::tree::{Block, RenderOptions, RenderTree, Span, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Shared builders
// ────────────────────────────────────────────────────────────────────────────

fn recipient_blocks(edit: bool, c: &CoverLetterContent) -> Vec<Block> {
    let r = &c.recipient_info;
    vec![
        Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![
                field(edit, &r.manager, FieldAddress::scalar("manager")),
                field(edit, &r.company, FieldAddress::scalar("company")),
            ],
        },
        Block::Paragraph {
            style: TextStyle::Small,
            spans: vec![
                field(edit, &r.company_address, FieldAddress::scalar("company_address")),
                field(edit, &r.company_city, FieldAddress::scalar("company_city")),
            ],
        },
    ]
}

fn subject_block(edit: bool, c: &CoverLetterContent) -> Block {
    Block::Paragraph {
        style: TextStyle::Body,
        spans: vec![
            Span::plain("Re:"),
            field(edit, &c.job_info.position, FieldAddress::scalar("position")),
            field(edit, &c.job_info.reference, FieldAddress::scalar("reference")),
        ],
    }
}

fn body_blocks(edit: bool, c: &CoverLetterContent) -> Vec<Block> {
    let chunks: Vec<&str> = c
        .body
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect();
    let single = chunks.len() == 1;
    chunks
        .into_iter()
        .map(|chunk| Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![if single {
                field(edit, chunk, FieldAddress::scalar("body"))
            } else {
                Span::plain(chunk)
            }],
        })
        .collect()
}

fn letter_tree(variant: LetterTemplate, font: FontFamily, opts: &RenderOptions, blocks: Vec<Block>) -> RenderTree {
    RenderTree {
        kind: DocumentKind::CoverLetter,
        variant: TemplateVariant::Letter(variant),
        font,
        scale: opts.scale,
        edit_mode: opts.edit_mode,
        blocks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Formal — full sender and recipient blocks, subject line, serif
// ────────────────────────────────────────────────────────────────────────────

pub struct FormalTemplate;

impl TemplateRenderer for FormalTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Letter(LetterTemplate::Formal)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::CoverLetter(c) = doc {
            let edit = opts.edit_mode;
            let p = &c.personal_info;
            blocks.push(Block::Heading {
                style: TextStyle::Title,
                spans: name_spans(edit, p),
            });
            blocks.push(Block::Paragraph {
                style: TextStyle::Small,
                spans: contact_spans(edit, p),
            });
            blocks.push(Block::Spacer { height_em: 1.5 });
            blocks.extend(recipient_blocks(edit, c));
            blocks.push(Block::Spacer { height_em: 1.0 });
            blocks.push(subject_block(edit, c));
            blocks.push(Block::Rule);
            blocks.extend(body_blocks(edit, c));
        }
        letter_tree(LetterTemplate::Formal, FontFamily::EbGaramond, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compact — condensed header, body first, recipient as footer
// ────────────────────────────────────────────────────────────────────────────

pub struct CompactTemplate;

impl TemplateRenderer for CompactTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Letter(LetterTemplate::Compact)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::CoverLetter(c) = doc {
            let edit = opts.edit_mode;
            let p = &c.personal_info;
            blocks.push(Block::Heading {
                style: TextStyle::Heading,
                spans: {
                    let mut spans = name_spans(edit, p);
                    spans.push(field(edit, &p.job_title, FieldAddress::scalar("job_title")));
                    spans
                },
            });
            blocks.push(Block::Paragraph {
                style: TextStyle::Small,
                spans: contact_spans(edit, p),
            });
            blocks.push(subject_block(edit, c));
            blocks.extend(body_blocks(edit, c));
            blocks.push(Block::Rule);
            blocks.extend(recipient_blocks(edit, c));
        }
        letter_tree(LetterTemplate::Compact, FontFamily::Lato, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
