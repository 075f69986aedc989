//! Page composition: slicing the measured content column into fixed-size
//! page frames for the on-screen print preview.
//!
//! Every frame receives the real content slice for its window — including the
//! frames after the first — and a block taller than one page appears in every
//! frame its range intersects, clipped at the frame edges.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::PageMetrics;
use crate::layout::measurer::Measurement;

/// One block's appearance inside a single page frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSlice {
    /// Index into `RenderTree::blocks`.
    pub block: usize,
    /// Offset of the block's top from the frame's top, in em. Negative when
    /// the block started on an earlier page and is clipped at this frame's
    /// top edge.
    pub local_y_em: f32,
    pub height_em: f32,
    pub clipped_top: bool,
    pub clipped_bottom: bool,
}

/// One fixed-size page of the preview. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFrame {
    pub index: u32,
    /// The content-column window this frame shows: `[start_em, start_em + page_height)`.
    pub start_em: f32,
    pub slices: Vec<FrameSlice>,
}

/// Slices a measurement into one frame per page.
///
/// The frame list length always equals `measurement.page_count`, so an empty
/// document still yields one (empty) frame.
pub fn compose(measurement: &Measurement, page: &PageMetrics) -> Vec<PageFrame> {
    let page_h = page.page_height_em;
    let mut frames = Vec::with_capacity(measurement.page_count as usize);

    for index in 0..measurement.page_count {
        let start = index as f32 * page_h;
        let end = start + page_h;

        let slices = measurement
            .blocks
            .iter()
            .filter(|b| b.y_em < end && b.y_em + b.height_em > start)
            .map(|b| FrameSlice {
                block: b.block,
                local_y_em: b.y_em - start,
                height_em: b.height_em,
                clipped_top: b.y_em < start,
                clipped_bottom: b.y_em + b.height_em > end,
            })
            .collect();

        frames.push(PageFrame {
            index,
            start_em: start,
            slices,
        });
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measurer::PositionedBlock;

    fn measurement(blocks: Vec<PositionedBlock>, page_count: u32) -> Measurement {
        let content_height_em = blocks
            .iter()
            .map(|b| b.y_em + b.height_em)
            .fold(0.0, f32::max);
        Measurement {
            content_height_em,
            page_count,
            overflow: page_count > 1,
            blocks,
        }
    }

    fn block(index: usize, y: f32, h: f32) -> PositionedBlock {
        PositionedBlock {
            block: index,
            y_em: y,
            height_em: h,
        }
    }

    #[test]
    fn test_empty_measurement_yields_one_empty_frame() {
        let frames = compose(&measurement(vec![], 1), &PageMetrics::default());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].slices.is_empty());
    }

    #[test]
    fn test_every_page_receives_its_content() {
        let page = PageMetrics::default();
        let h = page.page_height_em;
        let m = measurement(
            vec![block(0, 0.0, 10.0), block(1, h + 1.0, 10.0), block(2, 2.0 * h + 1.0, 5.0)],
            3,
        );
        let frames = compose(&m, &page);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].slices.len(), 1);
        assert_eq!(frames[1].slices.len(), 1);
        assert_eq!(frames[2].slices.len(), 1);
        assert_eq!(frames[1].slices[0].block, 1);
        assert!((frames[1].slices[0].local_y_em - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_block_straddling_a_boundary_appears_on_both_pages() {
        let page = PageMetrics::default();
        let h = page.page_height_em;
        let m = measurement(vec![block(0, h - 3.0, 6.0)], 2);
        let frames = compose(&m, &page);

        let first = &frames[0].slices[0];
        assert!(!first.clipped_top);
        assert!(first.clipped_bottom);

        let second = &frames[1].slices[0];
        assert!(second.clipped_top);
        assert!(!second.clipped_bottom);
        assert!(second.local_y_em < 0.0, "continuation starts above the frame");
    }

    #[test]
    fn test_block_taller_than_a_page_spans_three_frames() {
        let page = PageMetrics::default();
        let h = page.page_height_em;
        let m = measurement(vec![block(0, h * 0.5, h * 2.0)], 3);
        let frames = compose(&m, &page);
        assert!(frames.iter().all(|f| f.slices.len() == 1));
        let middle = &frames[1].slices[0];
        assert!(middle.clipped_top && middle.clipped_bottom);
    }

    #[test]
    fn test_block_ending_exactly_at_boundary_stays_off_next_page() {
        let page = PageMetrics::default();
        let h = page.page_height_em;
        let m = measurement(vec![block(0, h - 5.0, 5.0)], 2);
        let frames = compose(&m, &page);
        assert_eq!(frames[0].slices.len(), 1);
        assert!(frames[1].slices.is_empty());
    }
}
