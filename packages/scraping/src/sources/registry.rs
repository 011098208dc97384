//! Static table of recognized listing sources.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::product::ProductCategory;

/// Immutable record identifying a recognized domain and its display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Stable identifier (e.g. "gumroad")
    pub id: String,

    /// Human-readable name carried onto extracted records
    pub display_name: String,

    /// Category carried onto extracted records
    pub category: ProductCategory,

    /// Domains this source answers on. Subdomains match implicitly:
    /// "teachable.com" also matches "courses.teachable.com".
    pub domain_patterns: Vec<String>,
}

impl SourceDescriptor {
    /// Create a descriptor with no domains yet.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: ProductCategory,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category,
            domain_patterns: Vec::new(),
        }
    }

    /// Add a domain pattern.
    pub fn with_domain(mut self, pattern: impl Into<String>) -> Self {
        self.domain_patterns.push(pattern.into().to_ascii_lowercase());
        self
    }

    /// Case-insensitive hostname match, including subdomains.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.domain_patterns
            .iter()
            .any(|p| host == *p || host.ends_with(&format!(".{p}")))
    }
}

/// Read-only registry of recognized sources, defined at construction and
/// never mutated at runtime.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SourceRegistry {
    /// Registry with the built-in source table.
    pub fn builtin() -> Self {
        Self {
            sources: builtin_sources(),
        }
    }

    /// Empty registry, for callers composing their own table.
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a descriptor. Construction-time only; first match wins, so
    /// order is significant.
    pub fn with_source(mut self, descriptor: SourceDescriptor) -> Self {
        self.sources.push(descriptor);
        self
    }

    /// First descriptor whose patterns match the hostname.
    pub fn find_by_host(&self, host: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.matches_host(host))
    }

    /// Full registry snapshot keyed by id, in registration order.
    pub fn supported_sources(&self) -> IndexMap<String, SourceDescriptor> {
        self.sources
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect()
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn builtin_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new("gumroad", "Gumroad", ProductCategory::Marketplace)
            .with_domain("gumroad.com"),
        SourceDescriptor::new("etsy", "Etsy", ProductCategory::Marketplace)
            .with_domain("etsy.com"),
        SourceDescriptor::new("appsumo", "AppSumo", ProductCategory::Marketplace)
            .with_domain("appsumo.com"),
        SourceDescriptor::new("udemy", "Udemy", ProductCategory::CoursePlatform)
            .with_domain("udemy.com"),
        SourceDescriptor::new("coursera", "Coursera", ProductCategory::CoursePlatform)
            .with_domain("coursera.org"),
        SourceDescriptor::new("skillshare", "Skillshare", ProductCategory::CoursePlatform)
            .with_domain("skillshare.com"),
        SourceDescriptor::new("teachable", "Teachable", ProductCategory::CoursePlatform)
            .with_domain("teachable.com"),
        SourceDescriptor::new("podia", "Podia", ProductCategory::CoursePlatform)
            .with_domain("podia.com"),
        SourceDescriptor::new(
            "creative-market",
            "Creative Market",
            ProductCategory::DesignAssets,
        )
        .with_domain("creativemarket.com"),
        SourceDescriptor::new("envato", "Envato Market", ProductCategory::DesignAssets)
            .with_domain("envato.com")
            .with_domain("themeforest.net")
            .with_domain("codecanyon.net")
            .with_domain("graphicriver.net"),
        SourceDescriptor::new("dribbble", "Dribbble", ProductCategory::DesignAssets)
            .with_domain("dribbble.com"),
    ]
}
