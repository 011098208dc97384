//! Recognized product-listing sources.
//!
//! Sources are modeled as a plain table of descriptors plus pure matching
//! functions — declaratively extensible, no per-marketplace subclassing.

pub mod classifier;
pub mod registry;

pub use classifier::{classify, is_url_supported};
pub use registry::{SourceDescriptor, SourceRegistry};
