//! Layout: font metrics, content measurement, page composition, and the
//! layout-dirty signal that coalesces re-measurement.

pub mod compositor;
pub mod font_metrics;
pub mod measurer;
pub mod signal;

pub use compositor::{compose, FrameSlice, PageFrame};
pub use font_metrics::{get_metrics, FontFamily, FontMetricTable, PageMetrics};
pub use measurer::{measure, pages_for_height, Measurement, PositionedBlock};
pub use signal::LayoutSignal;
