//! Structured record extraction from park detail pages.
//!
//! ### Field policy
//! - Category and name are mandatory; a page without them fails extraction.
//! - Address, postal code and phone are optional and fall back to fixed
//!   sentinels, each independently of the others.
//!
//! ### Stable Abstraction
//! - Uses the `Extractor` trait so the directory client does not depend on
//!   the page markup directly.

pub mod fields;
mod text;

pub(crate) use text::{first, inner_text, selector};

use scraper::Html;

use nps_core::Error;

pub const NO_ADDRESS: &str = "No address";
pub const NO_ZIPCODE: &str = "No zipcode";
pub const NO_PHONE: &str = "No phone number";

/// One national site as scraped from its detail page.
///
/// Every field holds either real data or its sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    /// Detail page the record was built from
    pub url: String,
    /// Designation, e.g. "National Park" (may be empty)
    pub category: String,
    pub name: String,
    /// "{city}, {state}" or [`NO_ADDRESS`]
    pub address: String,
    /// Postal code or [`NO_ZIPCODE`]
    pub postal_code: String,
    /// Phone number or [`NO_PHONE`]
    pub phone: String,
}

impl SiteRecord {
    /// Build a record, substituting sentinels for missing optional fields.
    pub fn new(
        url: impl Into<String>, category: String, name: String, address: Option<String>,
        postal_code: Option<String>, phone: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            category,
            name,
            address: address.unwrap_or_else(|| NO_ADDRESS.to_string()),
            postal_code: postal_code.unwrap_or_else(|| NO_ZIPCODE.to_string()),
            phone: phone.unwrap_or_else(|| NO_PHONE.to_string()),
        }
    }

    /// Whether a real postal code was found.
    pub fn has_postal_code(&self) -> bool {
        self.postal_code != NO_ZIPCODE
    }

    /// One-line summary used in the site listing.
    pub fn info(&self) -> String {
        format!("{} ({}): {} {}", self.name, self.category, self.address, self.postal_code)
    }
}

/// Turns a detail page into a [`SiteRecord`].
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, url: &str) -> Result<SiteRecord, Error>;
}

/// Extractor for nps.gov park pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct SiteExtractor;

impl SiteExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for SiteExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<SiteRecord, Error> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let category =
            fields::category(root).ok_or_else(|| Error::ExtractFailed(format!("{url}: missing category")))?;
        let name = fields::name(root).ok_or_else(|| Error::ExtractFailed(format!("{url}: missing name")))?;

        let record = SiteRecord::new(
            url,
            category,
            name,
            fields::address(root),
            fields::postal_code(root),
            fields::phone(root),
        );

        tracing::debug!(url, name = %record.name, "extracted site record");
        Ok(record)
    }
}

/// Extract a site record using the default extractor.
pub fn extract_site(html: &str, url: &str) -> Result<SiteRecord, Error> {
    SiteExtractor::new().extract(html, url)
}
