//! Canned pages and a counting stub [`Fetcher`] for client tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::fetch::Fetcher;
use nps_core::Error;

/// Serves fixed bodies by URL and counts every request.
#[derive(Default)]
pub(crate) struct StubFetcher {
    pages: HashMap<String, String>,
    json: HashMap<String, Value>,
    calls: AtomicUsize,
    last_query: Mutex<Option<Vec<(String, String)>>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub(crate) fn with_json(mut self, url: &str, body: Value) -> Self {
        self.json.insert(url.to_string(), body);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_query(&self) -> Option<Vec<(String, String)>> {
        self.last_query.lock().ok().and_then(|q| q.clone())
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| Error::HttpError(format!("status 404 for {url}")))
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect());
        }
        self.json.get(url).cloned().ok_or_else(|| Error::HttpError(format!("status 404 for {url}")))
    }
}

pub(crate) const HOME_HTML: &str = r#"<!DOCTYPE html>
<html><body>
    <div class="SearchBar-keywordSearch input-group input-group-lg">
        <ul class="dropdown-menu SearchBar-keywordSearch" role="menu">
            <li><a href="/state/gu/index.htm">Guam</a></li>
            <li><a href="/state/mi/index.htm">Michigan</a></li>
        </ul>
    </div>
</body></html>"#;

pub(crate) const MICHIGAN_HTML: &str = r#"<!DOCTYPE html>
<html><body>
    <h1 class="page-title">Michigan</h1>
    <div id="parkListResultsArea">
        <ul id="list_parks">
            <li class="clearfix"><h2>National Park</h2><h3><a href="/isro/index.htm">Isle Royale</a></h3></li>
            <li class="clearfix"><h2>National Historical Park</h2><h3><a href="/kewe/index.htm">Keweenaw</a></h3></li>
            <li class="clearfix"><h2>National Lakeshore</h2><h3><a href="/piro/index.htm">Pictured Rocks</a></h3></li>
        </ul>
    </div>
</body></html>"#;

pub(crate) const ISRO_HTML: &str = r#"<!DOCTYPE html>
<html><body>
    <div class="Hero-titleContainer clearfix">
        <a href="/isro/" class="Hero-title">Isle Royale</a>
        <div class="Hero-designationContainer"><span class="Hero-designation">National Park</span></div>
    </div>
    <div itemprop="address"><p class="adr">
        <span itemprop="addressLocality">Houghton</span>, <span itemprop="addressRegion">MI</span>
        <span itemprop="postalCode">49931</span>
    </p></div>
    <div class="vcard"><span class="tel">(906) 482-0984</span></div>
</body></html>"#;

pub(crate) const KEWE_HTML: &str = r#"<!DOCTYPE html>
<html><body>
    <div class="Hero-titleContainer clearfix">
        <a href="/kewe/" class="Hero-title">Keweenaw</a>
        <div class="Hero-designationContainer"><span class="Hero-designation">National Historical Park</span></div>
    </div>
</body></html>"#;

pub(crate) const PIRO_HTML: &str = r#"<!DOCTYPE html>
<html><body>
    <div class="Hero-titleContainer clearfix">
        <a href="/piro/" class="Hero-title -long">Pictured Rocks</a>
        <div class="Hero-designationContainer"><span class="Hero-designation">National Lakeshore</span></div>
    </div>
    <div itemprop="address"><p class="adr">
        <span itemprop="addressLocality">Munising</span>, <span itemprop="addressRegion">MI</span>
        <span itemprop="postalCode">49862</span>
    </p></div>
</body></html>"#;
