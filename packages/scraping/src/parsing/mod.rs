//! Heuristic parsers over fetched page text.
//!
//! These are best-effort by design: they return `None`/empty on
//! unparseable input and never fail a scrape.

pub mod features;
pub mod markdown;
pub mod pricing;

pub use features::extract_features;
pub use markdown::{first_heading, first_paragraph, image_urls};
pub use pricing::PricingParser;
