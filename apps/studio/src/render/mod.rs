//! Template rendering: the render tree vocabulary, the closed-set variant
//! registry, and the built-in template implementations.

pub mod registry;
pub mod templates;
pub mod tree;

pub use registry::{TemplateRegistry, TemplateRenderer};
pub use tree::{Block, RenderOptions, RenderTree, Span, TextStyle};
