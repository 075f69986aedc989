//! The remote conversion endpoint client.
//!
//! Contract: one multipart POST carrying the encoded page image; success is
//! exactly HTTP 200 with the declared PDF content type and the print-ready
//! binary as the body. Any other status or content type is a conversion
//! failure — never silently accepted. Raw response diagnostics go to the log
//! for support; the user sees the generic conversion message.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, error};

use crate::export::error::ExportError;

/// The only content type the endpoint may declare on success.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Network seam of the pipeline, pluggable so tests stay hermetic.
#[async_trait]
pub trait ConvertService: Send + Sync {
    /// Converts an encoded PNG into the print-ready PDF binary.
    async fn convert(&self, image_png: Vec<u8>, filename: &str) -> Result<Bytes, ExportError>;
}

/// Accepts exactly 200 + `application/pdf` (parameters allowed); everything
/// else maps to the matching conversion failure.
pub fn validate_response(status: u16, content_type: &str) -> Result<(), ExportError> {
    if status != 200 {
        return Err(ExportError::ConversionHttp { status });
    }
    if !content_type.starts_with(PDF_CONTENT_TYPE) {
        return Err(ExportError::ConversionContentType {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

pub struct HttpConvertService {
    client: Client,
    endpoint: String,
}

impl HttpConvertService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpConvertService {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ConvertService for HttpConvertService {
    async fn convert(&self, image_png: Vec<u8>, filename: &str) -> Result<Bytes, ExportError> {
        debug!(endpoint = %self.endpoint, bytes = image_png.len(), "uploading page image for conversion");

        let part = Part::bytes(image_png)
            .file_name(filename.to_string())
            .mime_str("image/png")
            .map_err(|e| ExportError::Internal(format!("multipart build failed: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if let Err(err) = validate_response(status, &content_type) {
            let body = response.text().await.unwrap_or_default();
            error!(status, content_type, body, "conversion endpoint rejected the export");
            return Err(err);
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exactly_200_with_pdf() {
        assert!(validate_response(200, "application/pdf").is_ok());
    }

    #[test]
    fn test_accepts_pdf_with_parameters() {
        assert!(validate_response(200, "application/pdf; charset=binary").is_ok());
    }

    #[test]
    fn test_rejects_server_error_status() {
        let err = validate_response(500, "application/pdf").unwrap_err();
        assert!(matches!(err, ExportError::ConversionHttp { status: 500 }));
    }

    #[test]
    fn test_rejects_redirect_status() {
        // Only 200 counts as success, even "successful-ish" codes.
        let err = validate_response(204, "application/pdf").unwrap_err();
        assert!(matches!(err, ExportError::ConversionHttp { status: 204 }));
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let err = validate_response(200, "text/html").unwrap_err();
        match err {
            ExportError::ConversionContentType { content_type } => {
                assert_eq!(content_type, "text/html")
            }
            other => panic!("expected content-type failure, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_content_type() {
        assert!(validate_response(200, "").is_err());
    }
}
