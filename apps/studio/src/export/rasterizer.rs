//! Rasterization: drawing a measured render tree onto an RGBA canvas.
//!
//! The glyph rasterizer shares the measurer's wrapping and positions, so the
//! export bitmap paginates exactly like the preview. Remote photo assets are
//! never fetched here; an asset from an untrusted host marks the raster as
//! tainted, and the encoding stage turns that taint into the CORS-specific
//! export failure instead of a silently blank image.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontFamily, PageMetrics};
use crate::layout::measurer::{Measurement, LIST_INDENT_EM};
use crate::render::tree::{Block, RenderTree};

const INK: Rgba<u8> = Rgba([20u8, 20u8, 20u8, 255u8]);
const PAPER: Rgba<u8> = Rgba([255u8, 255u8, 255u8, 255u8]);
const PLACEHOLDER: Rgba<u8> = Rgba([225u8, 225u8, 225u8, 255u8]);

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("font '{family:?}' could not be loaded from {path}: {reason}")]
    FontLoad {
        family: FontFamily,
        path: String,
        reason: String,
    },

    #[error("rasterized canvas was empty")]
    EmptyCanvas,
}

/// The rasterization result. `tainted_by` names the first untrusted
/// cross-origin asset encountered, if any.
#[derive(Debug)]
pub struct Raster {
    pub image: RgbaImage,
    pub tainted_by: Option<String>,
}

/// CPU-bound raster stage, pluggable so tests can run without font assets.
pub trait Rasterizer: Send + Sync {
    fn rasterize(
        &self,
        tree: &RenderTree,
        measurement: &Measurement,
        page: &PageMetrics,
    ) -> Result<Raster, RasterError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Glyph rasterizer
// ────────────────────────────────────────────────────────────────────────────

pub struct GlyphRasterizer {
    font_dir: PathBuf,
    trusted_hosts: Vec<String>,
}

impl GlyphRasterizer {
    pub fn new(font_dir: impl Into<PathBuf>, trusted_hosts: Vec<String>) -> Self {
        GlyphRasterizer {
            font_dir: font_dir.into(),
            trusted_hosts,
        }
    }

    fn load_font(&self, family: FontFamily) -> Result<FontVec, RasterError> {
        let path = self.font_dir.join(family.file_name());
        let data = std::fs::read(&path).map_err(|e| RasterError::FontLoad {
            family,
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        FontVec::try_from_vec(data).map_err(|e| RasterError::FontLoad {
            family,
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the asset URL when it points at a host outside the trusted
    /// set. Relative and unparsable URLs count as same-origin.
    pub(crate) fn asset_taint(&self, url: &str) -> Option<String> {
        let parsed = reqwest::Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        if self.trusted_hosts.iter().any(|t| t == host) {
            None
        } else {
            Some(url.to_string())
        }
    }
}

impl Rasterizer for GlyphRasterizer {
    fn rasterize(
        &self,
        tree: &RenderTree,
        measurement: &Measurement,
        page: &PageMetrics,
    ) -> Result<Raster, RasterError> {
        let font = self.load_font(tree.font)?;
        let metrics = get_metrics(tree.font);
        let px = page.px_per_em(tree.scale);
        let margin_px = page.margin_em * px;

        let content_em = measurement.content_height_em.max(page.page_height_em);
        let width = (page.sheet_width_em() * px).ceil() as u32;
        let height = ((content_em + 2.0 * page.margin_em) * px).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyCanvas);
        }

        let mut canvas = RgbaImage::from_pixel(width, height, PAPER);
        let mut tainted_by: Option<String> = None;
        let mut drew_anything = false;

        for placed in &measurement.blocks {
            let block = &tree.blocks[placed.block];
            let top_px = margin_px + placed.y_em * px;

            match block {
                Block::Heading { style, .. } | Block::Paragraph { style, .. } => {
                    let text = block.joined_text();
                    if text.is_empty() {
                        continue;
                    }
                    let size = style.size_em();
                    let lines = metrics.wrap_lines(&text, page.text_width_em / size);
                    let scale = PxScale::from(size * px);
                    for (i, line) in lines.iter().enumerate() {
                        let y = top_px + i as f32 * size * page.line_height_em * px;
                        draw_text_mut(&mut canvas, INK, margin_px as i32, y as i32, scale, &font, line);
                        drew_anything = true;
                    }
                }
                Block::ListItem { .. } => {
                    let text = block.joined_text();
                    if text.is_empty() {
                        continue;
                    }
                    let lines = metrics.wrap_lines(&text, page.text_width_em - LIST_INDENT_EM);
                    let scale = PxScale::from(px);
                    let marker = (0.35 * px).max(1.0) as u32;
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(margin_px as i32, (top_px + 0.45 * px) as i32)
                            .of_size(marker, marker),
                        INK,
                    );
                    let indent = margin_px + LIST_INDENT_EM * px;
                    for (i, line) in lines.iter().enumerate() {
                        let y = top_px + i as f32 * page.line_height_em * px;
                        draw_text_mut(&mut canvas, INK, indent as i32, y as i32, scale, &font, line);
                        drew_anything = true;
                    }
                }
                Block::Photo { url, height_em } => {
                    if tainted_by.is_none() {
                        tainted_by = self.asset_taint(url);
                    }
                    let side = (height_em * px) as u32;
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(margin_px as i32, top_px as i32).of_size(side.max(1), side.max(1)),
                        PLACEHOLDER,
                    );
                    drew_anything = true;
                }
                Block::Rule => {
                    let thickness = (0.08 * px).max(1.0) as u32;
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(margin_px as i32, top_px as i32)
                            .of_size((page.text_width_em * px) as u32, thickness),
                        INK,
                    );
                    drew_anything = true;
                }
                Block::Spacer { .. } => {}
            }
        }

        if !drew_anything {
            return Err(RasterError::EmptyCanvas);
        }

        Ok(Raster {
            image: canvas,
            tainted_by,
        })
    }
}

/// Whether the font directory looks usable for the built-in families.
pub fn fonts_present(font_dir: &Path) -> bool {
    font_dir.join(FontFamily::Inter.file_name()).exists()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
