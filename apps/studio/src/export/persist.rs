//! Post-export persistence seams: the audit record, the host's storage, the
//! notification channel, and the pre-flight gate.
//!
//! Storage and notification are best-effort by contract: their failure is
//! logged by the pipeline and never changes the already-reported export
//! outcome. The gate runs before the pipeline starts; a veto means no state
//! transition ever happens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Document, DocumentKind, TemplateVariant};

/// The audit record written after a successful download: keyed by user and
/// document kind, carrying the full frozen snapshot, the variant, and an
/// ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub user_id: Uuid,
    pub kind: DocumentKind,
    pub snapshot: Document,
    pub variant: TemplateVariant,
    pub exported_at: DateTime<Utc>,
}

impl ExportRecord {
    pub fn timestamp_iso8601(&self) -> String {
        self.exported_at.to_rfc3339()
    }
}

/// The host's storage for export audit records.
#[async_trait]
pub trait ExportStore: Send + Sync {
    async fn record_export(&self, record: &ExportRecord) -> anyhow::Result<()>;
}

/// User-facing toasts and the fire-and-forget export notification call.
#[async_trait]
pub trait ExportNotifier: Send + Sync {
    async fn export_succeeded(
        &self,
        user_id: Uuid,
        kind: DocumentKind,
        variant: TemplateVariant,
    ) -> anyhow::Result<()>;

    async fn export_failed(
        &self,
        user_id: Uuid,
        kind: DocumentKind,
        message: &str,
    ) -> anyhow::Result<()>;
}

/// Pre-flight veto hook, e.g. a subscription check.
#[async_trait]
pub trait ExportGate: Send + Sync {
    async fn allow_export(&self, user_id: Uuid, kind: DocumentKind) -> bool;
}

/// Gate for hosts without any export restriction.
pub struct AllowAllGate;

#[async_trait]
impl ExportGate for AllowAllGate {
    async fn allow_export(&self, _user_id: Uuid, _kind: DocumentKind) -> bool {
        true
    }
}
