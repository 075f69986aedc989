//! Export failure taxonomy.
//!
//! Everything before the Ready state is fatal to the attempt and produces
//! exactly one user-visible failure notification; persistence and
//! notification failures after Ready are logged and swallowed, so they never
//! appear here. There are no automatic retries anywhere in the pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The host's gate declined the export before the pipeline started.
    #[error("export declined by the host")]
    Vetoed,

    /// Rejected because another export holds the single in-flight slot.
    #[error("another export is already in flight")]
    AlreadyInFlight,

    #[error("render produced no visible content")]
    RenderEmpty,

    #[error("rasterization produced an empty page")]
    RasterEmpty,

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("bitmap could not be encoded: {0}")]
    Encoding(String),

    /// The dominant real-world failure mode: a cross-origin asset tainted
    /// the canvas. Carries its own actionable user message.
    #[error("bitmap tainted by cross-origin asset '{asset}'")]
    EncodingCors { asset: String },

    #[error("conversion service returned HTTP {status}")]
    ConversionHttp { status: u16 },

    #[error("conversion service returned content type '{content_type}'")]
    ConversionContentType { content_type: String },

    #[error("conversion request failed: {0}")]
    ConversionTransport(#[from] reqwest::Error),

    #[error("download could not be delivered: {0}")]
    Download(String),

    #[error("internal export failure: {0}")]
    Internal(String),
}

impl ExportError {
    /// The one user-facing message for this failure. Reason-specific where
    /// the reason is actionable, generic otherwise; raw diagnostics go to the
    /// log, not to the user.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Vetoed => "Exporting is not available for this account.".to_string(),
            ExportError::AlreadyInFlight => {
                "An export is already in progress. Please wait for it to finish.".to_string()
            }
            ExportError::RenderEmpty | ExportError::RasterEmpty => {
                "The document rendered empty, so there was nothing to export. \
                 Add some content and try again."
                    .to_string()
            }
            ExportError::EncodingCors { asset } => format!(
                "The export image could not be encoded because '{asset}' was loaded \
                 from another origin without cross-origin approval. Host the image \
                 with permissive CORS headers or remove it, then try again."
            ),
            _ => "The export could not be completed. Please try again.".to_string(),
        }
    }
}
