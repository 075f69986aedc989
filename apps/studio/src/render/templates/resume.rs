//! The four résumé templates.
//!
//! All four consume the same `ResumeContent` and differ in font, section
//! order, and block styling. Section builders are shared where the layouts
//! agree and specialized where they do not.

use crate::layout::font_metrics::FontFamily;
use crate::model::{
    Collection, Document, DocumentKind, FieldAddress, ResumeContent, ResumeTemplate,
    TemplateVariant,
};
use crate::render::registry::TemplateRenderer;
use crate::render::templates::{contact_spans, field, name_spans};
use crate::render::tree::{Block, RenderOptions, RenderTree, Span, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Shared section builders
// ────────────────────────────────────────────────────────────────────────────

const PHOTO_HEIGHT_EM: f32 = 8.0;

fn item(edit: bool, collection: Collection, index: usize, text: &str, leaf: &str) -> Span {
    field(edit, text, FieldAddress::item(collection, index, leaf))
}

fn header_blocks(edit: bool, r: &ResumeContent, with_photo: bool) -> Vec<Block> {
    let p = &r.personal_info;
    let mut blocks = vec![
        Block::Heading {
            style: TextStyle::Title,
            spans: name_spans(edit, p),
        },
        Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![field(edit, &p.job_title, FieldAddress::scalar("job_title"))],
        },
        Block::Paragraph {
            style: TextStyle::Small,
            spans: contact_spans(edit, p),
        },
    ];
    if with_photo {
        if let Some(url) = &p.photo_url {
            blocks.push(Block::Photo {
                url: url.clone(),
                height_em: PHOTO_HEIGHT_EM,
            });
        }
    }
    blocks
}

fn summary_blocks(edit: bool, r: &ResumeContent, heading: &str) -> Vec<Block> {
    if r.summary.is_empty() {
        return Vec::new();
    }
    vec![
        Block::Heading {
            style: TextStyle::Heading,
            spans: vec![Span::plain(heading)],
        },
        Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![field(edit, &r.summary, FieldAddress::scalar("summary"))],
        },
    ]
}

fn experience_blocks(edit: bool, r: &ResumeContent, heading: &str) -> Vec<Block> {
    if r.experience.is_empty() {
        return Vec::new();
    }
    let mut blocks = vec![Block::Heading {
        style: TextStyle::Heading,
        spans: vec![Span::plain(heading)],
    }];
    for (i, entry) in r.experience.iter().enumerate() {
        let col = Collection::Experience;
        blocks.push(Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![
                item(edit, col, i, &entry.job_title, "job_title"),
                Span::plain("·"),
                item(edit, col, i, &entry.employer, "employer"),
            ],
        });
        blocks.push(Block::Paragraph {
            style: TextStyle::Small,
            spans: vec![
                item(edit, col, i, &entry.start_date, "start_date"),
                Span::plain("to"),
                item(edit, col, i, &entry.end_date, "end_date"),
                item(edit, col, i, &entry.city, "city"),
            ],
        });
        blocks.push(Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![item(edit, col, i, &entry.description, "description")],
        });
    }
    blocks
}

fn education_blocks(edit: bool, r: &ResumeContent, heading: &str) -> Vec<Block> {
    if r.education.is_empty() {
        return Vec::new();
    }
    let mut blocks = vec![Block::Heading {
        style: TextStyle::Heading,
        spans: vec![Span::plain(heading)],
    }];
    for (i, entry) in r.education.iter().enumerate() {
        let col = Collection::Education;
        blocks.push(Block::Paragraph {
            style: TextStyle::Body,
            spans: vec![
                item(edit, col, i, &entry.degree, "degree"),
                Span::plain("·"),
                item(edit, col, i, &entry.school, "school"),
            ],
        });
        blocks.push(Block::Paragraph {
            style: TextStyle::Small,
            spans: vec![
                item(edit, col, i, &entry.start_date, "start_date"),
                Span::plain("to"),
                item(edit, col, i, &entry.end_date, "end_date"),
                item(edit, col, i, &entry.city, "city"),
            ],
        });
        if !entry.description.is_empty() {
            blocks.push(Block::Paragraph {
                style: TextStyle::Body,
                spans: vec![item(edit, col, i, &entry.description, "description")],
            });
        }
    }
    blocks
}

/// One bulleted line per skill.
fn skill_list_blocks(edit: bool, r: &ResumeContent, heading: &str) -> Vec<Block> {
    if r.skills.is_empty() {
        return Vec::new();
    }
    let mut blocks = vec![Block::Heading {
        style: TextStyle::Heading,
        spans: vec![Span::plain(heading)],
    }];
    for (i, skill) in r.skills.iter().enumerate() {
        blocks.push(Block::ListItem {
            spans: vec![
                item(edit, Collection::Skills, i, &skill.name, "name"),
                Span::plain("·"),
                item(edit, Collection::Skills, i, &skill.level, "level"),
            ],
        });
    }
    blocks
}

/// All skills on one row, each name still individually addressable.
fn skill_row_block(edit: bool, r: &ResumeContent) -> Vec<Block> {
    if r.skills.is_empty() {
        return Vec::new();
    }
    let spans = r
        .skills
        .iter()
        .enumerate()
        .map(|(i, s)| item(edit, Collection::Skills, i, &s.name, "name"))
        .collect();
    vec![Block::Paragraph {
        style: TextStyle::Small,
        spans,
    }]
}

fn resume_tree(variant: ResumeTemplate, font: FontFamily, opts: &RenderOptions, blocks: Vec<Block>) -> RenderTree {
    RenderTree {
        kind: DocumentKind::Resume,
        variant: TemplateVariant::Resume(variant),
        font,
        scale: opts.scale,
        edit_mode: opts.edit_mode,
        blocks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hacker — sans-serif single column, summary first, skills as a row
// ────────────────────────────────────────────────────────────────────────────

pub struct HackerTemplate;

impl TemplateRenderer for HackerTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Resume(ResumeTemplate::Hacker)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::Resume(r) = doc {
            let edit = opts.edit_mode;
            blocks.extend(header_blocks(edit, r, false));
            blocks.extend(skill_row_block(edit, r));
            blocks.push(Block::Rule);
            blocks.extend(summary_blocks(edit, r, "About"));
            blocks.extend(experience_blocks(edit, r, "Experience"));
            blocks.extend(education_blocks(edit, r, "Education"));
        }
        resume_tree(ResumeTemplate::Hacker, FontFamily::Inter, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Researcher — serif, education before experience, photo shown
// ────────────────────────────────────────────────────────────────────────────

pub struct ResearcherTemplate;

impl TemplateRenderer for ResearcherTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Resume(ResumeTemplate::Researcher)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::Resume(r) = doc {
            let edit = opts.edit_mode;
            blocks.extend(header_blocks(edit, r, true));
            blocks.push(Block::Rule);
            blocks.extend(summary_blocks(edit, r, "Profile"));
            blocks.extend(education_blocks(edit, r, "Education"));
            blocks.extend(experience_blocks(edit, r, "Appointments"));
            blocks.extend(skill_list_blocks(edit, r, "Methods & Tools"));
        }
        resume_tree(ResumeTemplate::Researcher, FontFamily::EbGaramond, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operator — skills-forward, rules between all sections
// ────────────────────────────────────────────────────────────────────────────

pub struct OperatorTemplate;

impl TemplateRenderer for OperatorTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Resume(ResumeTemplate::Operator)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::Resume(r) = doc {
            let edit = opts.edit_mode;
            blocks.extend(header_blocks(edit, r, false));
            blocks.push(Block::Rule);
            blocks.extend(skill_list_blocks(edit, r, "Core Skills"));
            if !r.skills.is_empty() {
                blocks.push(Block::Rule);
            }
            blocks.extend(experience_blocks(edit, r, "Experience"));
            if !r.experience.is_empty() {
                blocks.push(Block::Rule);
            }
            blocks.extend(summary_blocks(edit, r, "Summary"));
            blocks.extend(education_blocks(edit, r, "Education"));
        }
        resume_tree(ResumeTemplate::Operator, FontFamily::Lato, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classic — traditional order, uppercase headings, no photo, no rules
// ────────────────────────────────────────────────────────────────────────────

pub struct ClassicTemplate;

impl TemplateRenderer for ClassicTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Resume(ResumeTemplate::Classic)
    }

    fn render(&self, doc: &Document, opts: &RenderOptions) -> RenderTree {
        let mut blocks = Vec::new();
        if let Document::Resume(r) = doc {
            let edit = opts.edit_mode;
            blocks.extend(header_blocks(edit, r, false));
            blocks.extend(summary_blocks(edit, r, "OBJECTIVE"));
            blocks.extend(experience_blocks(edit, r, "WORK EXPERIENCE"));
            blocks.extend(education_blocks(edit, r, "EDUCATION"));
            blocks.extend(skill_list_blocks(edit, r, "SKILLS"));
        }
        resume_tree(ResumeTemplate::Classic, FontFamily::ComputerModern, opts, blocks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
