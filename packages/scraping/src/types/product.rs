//! The structured product record produced by the extraction engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a recognized source, carried onto extracted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// General digital-product marketplaces (Gumroad, Etsy, AppSumo)
    Marketplace,
    /// Online course platforms (Udemy, Coursera, Skillshare)
    CoursePlatform,
    /// Design-asset stores (Creative Market, Envato)
    DesignAssets,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::Marketplace => "marketplace",
            ProductCategory::CoursePlatform => "course-platform",
            ProductCategory::DesignAssets => "design-assets",
        };
        f.write_str(name)
    }
}

/// How a product is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingKind {
    Free,
    OneTime,
    Subscription,
}

/// Billing interval for subscription pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

/// Pricing detected on a listing page.
///
/// Fields degrade independently: a recognized "free" marker yields
/// `amount == Some(0.0)` with no currency; an amount with no interval
/// marker is a one-time purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Numeric amount in the listing's currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// ISO 4217 currency code (e.g. "USD")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Charge model
    #[serde(rename = "type")]
    pub kind: PricingKind,

    /// Present only for subscriptions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,
}

impl Pricing {
    /// Pricing for a listing marked "free".
    pub fn free() -> Self {
        Self {
            amount: Some(0.0),
            currency: None,
            kind: PricingKind::Free,
            interval: None,
        }
    }

    /// One-time pricing with a detected amount.
    pub fn one_time(amount: f64, currency: Option<String>) -> Self {
        Self {
            amount: Some(amount),
            currency,
            kind: PricingKind::OneTime,
            interval: None,
        }
    }

    /// Subscription pricing with a detected amount and interval.
    pub fn subscription(amount: f64, currency: Option<String>, interval: BillingInterval) -> Self {
        Self {
            amount: Some(amount),
            currency,
            kind: PricingKind::Subscription,
            interval: Some(interval),
        }
    }
}

/// Structured record extracted from a fetched listing page.
///
/// Missing or unparsable fields degrade to `None`/empty rather than
/// failing the scrape; only transport and classification failures
/// surface as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductExtract {
    /// Listing title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Listing description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display name of the recognized source
    pub source: String,

    /// Detected pricing, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,

    /// Bullet-point feature list, in page order
    #[serde(default)]
    pub features: Vec<String>,

    /// Image URLs, collected only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Category of the source the listing came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,

    /// The URL the record was extracted from
    pub url: String,
}
