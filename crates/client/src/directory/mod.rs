//! Park directory client.
//!
//! Walks the directory site top-down: home page → region listing → site
//! detail page. Every page goes through the [`CacheStore`], so each URL is
//! downloaded at most once, even across runs.

pub mod parse;

pub use parse::{parse_region_links, parse_site_links};

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::extract::{Extractor, SiteExtractor, SiteRecord};
use crate::fetch::Fetcher;
use nps_core::{CacheStore, Error};

/// Lowercase form used for region lookup keys.
pub fn normalize_region(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Region name → listing URL, built once from the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDirectory {
    regions: BTreeMap<String, String>,
}

impl RegionDirectory {
    pub fn from_links(links: impl IntoIterator<Item = (String, String)>) -> Self {
        let regions = links.into_iter().map(|(name, url)| (normalize_region(&name), url)).collect();
        Self { regions }
    }

    /// Listing URL for `name`, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.regions.get(&normalize_region(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Client for the park directory site.
pub struct SiteDirectory<F> {
    fetcher: F,
    base: Url,
    extractor: Box<dyn Extractor>,
}

impl<F: Fetcher> SiteDirectory<F> {
    /// Create a client rooted at `base_url`, using the default page extractor.
    pub fn new(fetcher: F, base_url: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { fetcher, base, extractor: Box::new(SiteExtractor::new()) })
    }

    /// Replace the detail-page extractor.
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Map every region listed in the home page's region selector to its URL.
    pub async fn list_regions(&self, cache: &mut CacheStore) -> Result<RegionDirectory, Error> {
        let html = self.fetch_page(cache, self.base.as_str()).await?;
        let links = parse_region_links(&html, &self.base)?;

        tracing::debug!(count = links.len(), "listed regions");
        Ok(RegionDirectory::from_links(links))
    }

    /// Detail-page URLs for one region, in listing order.
    pub async fn list_region_sites(&self, cache: &mut CacheStore, region_url: &str) -> Result<Vec<String>, Error> {
        let html = self.fetch_page(cache, region_url).await?;
        let urls = parse_site_links(&html, &self.base)?;

        tracing::debug!(region_url, count = urls.len(), "listed region sites");
        Ok(urls)
    }

    /// Fetch one detail page and extract its record.
    pub async fn fetch_site_record(&self, cache: &mut CacheStore, url: &str) -> Result<SiteRecord, Error> {
        let html = self.fetch_page(cache, url).await?;
        self.extractor.extract(&html, url)
    }

    /// Records for every site in a region, in listing order.
    ///
    /// Sites whose pages lack a mandatory field are skipped; transport and
    /// cache failures abort the whole listing.
    pub async fn fetch_region_sites(&self, cache: &mut CacheStore, region_url: &str) -> Result<Vec<SiteRecord>, Error> {
        let urls = self.list_region_sites(cache, region_url).await?;
        let mut records = Vec::with_capacity(urls.len());

        for url in &urls {
            match self.fetch_site_record(cache, url).await {
                Ok(record) => records.push(record),
                Err(Error::ExtractFailed(reason)) => tracing::warn!(url = %url, %reason, "skipping site"),
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }

    async fn fetch_page(&self, cache: &mut CacheStore, url: &str) -> Result<String, Error> {
        let fetcher = &self.fetcher;
        let value = cache.get_or_fetch(url, || async move { fetcher.get_text(url).await.map(Value::String) }).await?;

        match value {
            Value::String(html) => Ok(html),
            _ => Err(Error::CacheEntry(url.to_string())),
        }
    }
}
