//! Extraction engine: fetched content + source descriptor → product record.
//!
//! Extraction is never a failure path. Every field degrades
//! independently to `None`/empty; only transport and classification
//! problems surface as errors, upstream of this module.

use crate::fetch::FetchedContent;
use crate::parsing::{extract_features, first_heading, first_paragraph, image_urls, PricingParser};
use crate::sources::SourceDescriptor;
use crate::types::product::ProductExtract;
use crate::types::request::ScrapeOptions;

/// Build a normalized product record from one fetched page.
pub fn extract_product(
    parser: &PricingParser,
    content: &FetchedContent,
    source: &SourceDescriptor,
    options: &ScrapeOptions,
    url: &str,
) -> ProductExtract {
    let title = content
        .metadata
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| first_heading(&content.markdown));

    let description = content
        .metadata
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .or_else(|| first_paragraph(&content.markdown));

    let images = options
        .include_images
        .then(|| image_urls(&content.markdown));

    ProductExtract {
        title,
        description,
        source: source.display_name.clone(),
        pricing: parser.parse(&content.markdown),
        features: extract_features(&content.markdown),
        images,
        category: Some(source.category),
        url: url.to_string(),
    }
}
