//! Inline-edit routing and the live preview session.

pub mod router;
pub mod session;

pub use router::apply_edit;
pub use session::{DocumentSink, NullSink, PreviewSession};
