//! The export pipeline: render, rasterize, encode, convert, deliver, persist.

pub mod convert;
pub mod download;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod rasterizer;

pub use convert::{ConvertService, HttpConvertService, PDF_CONTENT_TYPE};
pub use download::{DownloadSink, FileDownloadSink};
pub use error::ExportError;
pub use persist::{AllowAllGate, ExportGate, ExportNotifier, ExportRecord, ExportStore};
pub use pipeline::{
    ExportJob, ExportPipeline, ExportReceipt, ExportRequest, ExportState, EXPORT_SCALE,
};
pub use rasterizer::{GlyphRasterizer, Raster, RasterError, Rasterizer};
