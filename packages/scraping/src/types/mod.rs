//! Data types flowing through the scraping pipeline.
//!
//! Requests and extracted records are transient (one call); only
//! [`crate::stats::ScrapeStats`] outlives a request.

pub mod product;
pub mod request;
pub mod result;

pub use product::{BillingInterval, Pricing, PricingKind, ProductCategory, ProductExtract};
pub use request::{Priority, ScrapeOptions, ScrapeRequest};
pub use result::{ErrorCode, ScrapeFailure, ScrapeResult};
