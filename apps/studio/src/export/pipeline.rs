//! The export state machine: render → rasterize → encode → upload/convert →
//! download → persist.
//!
//! The pipeline freezes its own snapshot of the document when the job starts;
//! concurrent edits to the live document never affect an in-flight export.
//! Exactly one export may be in flight at a time: a second request is
//! rejected up front with `AlreadyInFlight` rather than racing the first.
//! Any failure before the download aborts the whole attempt — no retries,
//! no partial artifacts — and produces exactly one user-visible failure
//! notification. Failures at or after persistence are logged and swallowed.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::export::convert::{ConvertService, HttpConvertService};
use crate::export::download::{DownloadSink, FileDownloadSink};
use crate::export::error::ExportError;
use crate::export::persist::{ExportGate, ExportNotifier, ExportRecord, ExportStore};
use crate::export::rasterizer::{GlyphRasterizer, Raster, RasterError, Rasterizer};
use crate::layout::{measure, PageMetrics};
use crate::model::{Document, TemplateVariant};
use crate::render::{RenderOptions, TemplateRegistry};

/// Fixed supersampling factor for print-grade output: the export renders the
/// same tree as the preview, at three times the scale.
pub const EXPORT_SCALE: f32 = 3.0;

// ────────────────────────────────────────────────────────────────────────────
// Job types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ExportState {
    Idle,
    Rendering,
    Rasterizing,
    Encoding,
    Uploading,
    Converting,
    Ready,
    Persisted,
    Failed(String),
}

/// One export attempt over a frozen snapshot.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: Uuid,
    pub snapshot: Document,
    pub variant: TemplateVariant,
    pub state: ExportState,
    pub started_at: DateTime<Utc>,
}

pub struct ExportRequest {
    pub user_id: Uuid,
    pub document: Document,
    pub variant: TemplateVariant,
}

/// What the caller gets back on success. `persisted` is false when the
/// best-effort audit write failed after the download already completed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub job_id: Uuid,
    pub filename: String,
    pub pdf_bytes: usize,
    pub persisted: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct ExportPipeline {
    registry: Arc<TemplateRegistry>,
    page: PageMetrics,
    rasterizer: Arc<dyn Rasterizer>,
    converter: Arc<dyn ConvertService>,
    downloads: Arc<dyn DownloadSink>,
    store: Arc<dyn ExportStore>,
    notifier: Arc<dyn ExportNotifier>,
    gate: Arc<dyn ExportGate>,
    in_flight: AtomicBool,
}

impl ExportPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<TemplateRegistry>,
        page: PageMetrics,
        rasterizer: Arc<dyn Rasterizer>,
        converter: Arc<dyn ConvertService>,
        downloads: Arc<dyn DownloadSink>,
        store: Arc<dyn ExportStore>,
        notifier: Arc<dyn ExportNotifier>,
        gate: Arc<dyn ExportGate>,
    ) -> Self {
        ExportPipeline {
            registry,
            page,
            rasterizer,
            converter,
            downloads,
            store,
            notifier,
            gate,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wires the default production stack from configuration: glyph
    /// rasterizer, HTTP conversion client, and local file downloads.
    pub fn from_config(
        config: &Config,
        registry: Arc<TemplateRegistry>,
        store: Arc<dyn ExportStore>,
        notifier: Arc<dyn ExportNotifier>,
        gate: Arc<dyn ExportGate>,
    ) -> Self {
        Self::new(
            registry,
            PageMetrics::default(),
            Arc::new(GlyphRasterizer::new(
                config.font_dir.clone(),
                config.trusted_asset_hosts.clone(),
            )),
            Arc::new(HttpConvertService::new(config.convert_endpoint_url.clone())),
            Arc::new(FileDownloadSink::new(config.download_dir.clone())),
            store,
            notifier,
            gate,
        )
    }

    /// Whether an export currently holds the in-flight slot.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one export end to end.
    ///
    /// The gate runs first; a veto means the pipeline never starts and no
    /// state transition or notification happens.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportReceipt, ExportError> {
        let kind = request.document.kind();
        if !self.gate.allow_export(request.user_id, kind).await {
            info!(user = %request.user_id, kind = kind.key(), "export vetoed by gate");
            return Err(ExportError::Vetoed);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(user = %request.user_id, "export rejected, another one is in flight");
            return Err(ExportError::AlreadyInFlight);
        }
        let _slot = InFlightSlot(&self.in_flight);

        let mut job = ExportJob {
            id: Uuid::new_v4(),
            snapshot: request.document,
            variant: request.variant.clamp_to(kind),
            state: ExportState::Idle,
            started_at: Utc::now(),
        };
        info!(job = %job.id, kind = kind.key(), variant = job.variant.key(), "export started");

        match self.run(&mut job, request.user_id).await {
            Ok(receipt) => {
                info!(job = %job.id, file = %receipt.filename, persisted = receipt.persisted, "export finished");
                Ok(receipt)
            }
            Err(err) => {
                job.state = ExportState::Failed(err.to_string());
                error!(job = %job.id, error = %err, "export failed");
                if let Err(notify_err) = self
                    .notifier
                    .export_failed(request.user_id, kind, &err.user_message())
                    .await
                {
                    warn!(error = %notify_err, "failure notification could not be delivered");
                }
                Err(err)
            }
        }
    }

    async fn run(&self, job: &mut ExportJob, user_id: Uuid) -> Result<ExportReceipt, ExportError> {
        // Rendering: the export snapshot goes through the same renderer as
        // the preview, at the supersampling scale.
        job.state = ExportState::Rendering;
        let tree = self.registry.render(
            &job.snapshot,
            job.variant,
            &RenderOptions {
                edit_mode: false,
                scale: EXPORT_SCALE,
            },
        );
        if tree.is_empty() {
            return Err(ExportError::RenderEmpty);
        }
        let measurement = measure(&tree, &self.page);
        debug!(job = %job.id, pages = measurement.page_count, "export render measured");

        // Rasterizing is CPU-bound; keep the executor unblocked.
        job.state = ExportState::Rasterizing;
        let raster = {
            let rasterizer = Arc::clone(&self.rasterizer);
            let page = self.page.clone();
            let tree = tree.clone();
            let measurement = measurement.clone();
            tokio::task::spawn_blocking(move || rasterizer.rasterize(&tree, &measurement, &page))
                .await
                .map_err(|e| ExportError::Internal(format!("rasterization task failed: {e}")))?
                .map_err(|e| match e {
                    RasterError::EmptyCanvas => ExportError::RasterEmpty,
                    other => ExportError::Raster(other.to_string()),
                })?
        };

        job.state = ExportState::Encoding;
        let png = encode_stage(raster).await?;

        job.state = ExportState::Uploading;
        let filename = format!("{}-{}.pdf", job.snapshot.kind().key(), job.id);
        let pdf = self.converter.convert(png, &filename).await?;
        job.state = ExportState::Converting;

        // Ready: deliver the file, then release the buffer so repeated
        // exports do not pile up in memory.
        self.downloads.deliver(&filename, &pdf).await?;
        let pdf_bytes = pdf.len();
        drop(pdf);
        job.state = ExportState::Ready;

        // Everything past this point is best-effort and must not retract the
        // user-visible success.
        let record = ExportRecord {
            user_id,
            kind: job.snapshot.kind(),
            snapshot: job.snapshot.clone(),
            variant: job.variant,
            exported_at: Utc::now(),
        };
        let persisted = match self.store.record_export(&record).await {
            Ok(()) => {
                job.state = ExportState::Persisted;
                true
            }
            Err(e) => {
                warn!(job = %job.id, error = %e, "export audit record could not be written");
                false
            }
        };
        if let Err(e) = self
            .notifier
            .export_succeeded(user_id, record.kind, record.variant)
            .await
        {
            warn!(job = %job.id, error = %e, "success notification could not be delivered");
        }

        Ok(ExportReceipt {
            job_id: job.id,
            filename,
            pdf_bytes,
            persisted,
        })
    }
}

/// Releases the single in-flight slot when the export ends, on every path.
struct InFlightSlot<'a>(&'a AtomicBool);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Encoding stage: taint check first, then PNG encode off the executor.
async fn encode_stage(raster: Raster) -> Result<Vec<u8>, ExportError> {
    if let Some(asset) = raster.tainted_by {
        // The dominant real failure mode gets its own diagnostic.
        return Err(ExportError::EncodingCors { asset });
    }
    tokio::task::spawn_blocking(move || encode_png(raster.image))
        .await
        .map_err(|e| ExportError::Internal(format!("encoding task failed: {e}")))?
}

fn encode_png(image: RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    Ok(buf)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
