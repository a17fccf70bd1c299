//! Interactive menu loop.
//!
//! Region prompt → site listing → site prompt → nearby places. Failures of a
//! single operation are printed and the menu re-prompts; a cache write
//! failure ends the session.

use std::io::Write;

use anyhow::Result;
use nps_client::{Fetcher, PlacesClient, RegionDirectory, SiteDirectory, SiteRecord};
use nps_core::{CacheStore, Error, cache::CacheStats};

use crate::input::{RegionInput, SiteInput, parse_region_input, parse_site_input};
use crate::prompt::Prompt;
use crate::render::Screen;

pub const REGION_PROMPT: &str = r#"Enter a state or territory name (e.g. Michigan, michigan, Guam) or "exit""#;
pub const SITE_PROMPT: &str = r#"Choose a number from the National Sites list for detailed search or "exit" or "back""#;

enum Flow {
    Back,
    Exit,
}

pub struct Controller<F, W> {
    directory: SiteDirectory<F>,
    places: Result<PlacesClient<F>, Error>,
    cache: CacheStore,
    prompt: Box<dyn Prompt>,
    screen: Screen<W>,
}

impl<F: Fetcher, W: Write> Controller<F, W> {
    /// `places` is kept as a result so a missing credential only fails nearby searches.
    pub fn new(
        directory: SiteDirectory<F>, places: Result<PlacesClient<F>, Error>, cache: CacheStore,
        prompt: Box<dyn Prompt>, screen: Screen<W>,
    ) -> Self {
        Self { directory, places, cache, prompt, screen }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Fails if the region list cannot be built, on a cache write failure, or
    /// if the terminal itself fails.
    pub async fn run(&mut self) -> Result<()> {
        let regions = self.directory.list_regions(&mut self.cache).await?;
        tracing::debug!(regions = regions.len(), "region directory ready");

        loop {
            let Some((region, url)) = self.ask_region(&regions)? else { break };

            let sites = match self.directory.fetch_region_sites(&mut self.cache, &url).await {
                Ok(sites) => sites,
                Err(e) => {
                    self.report(e)?;
                    continue;
                }
            };

            self.screen.site_list(&region, &sites)?;

            match self.choose_sites(&sites).await? {
                Flow::Back => continue,
                Flow::Exit => break,
            }
        }

        self.screen.goodbye()?;
        Ok(())
    }

    fn ask_region(&mut self, regions: &RegionDirectory) -> Result<Option<(String, String)>> {
        loop {
            self.screen.blank()?;
            let Some(line) = self.prompt.read_line(REGION_PROMPT)? else { return Ok(None) };

            match parse_region_input(&line) {
                RegionInput::Exit => return Ok(None),
                RegionInput::Name(name) => match regions.get(&name) {
                    Some(url) => return Ok(Some((name, url.to_string()))),
                    None => self.screen.invalid_region()?,
                },
            }
        }
    }

    async fn choose_sites(&mut self, sites: &[SiteRecord]) -> Result<Flow> {
        loop {
            self.screen.blank()?;
            let Some(line) = self.prompt.read_line(SITE_PROMPT)? else { return Ok(Flow::Exit) };

            match parse_site_input(&line, sites.len()) {
                Ok(SiteInput::Exit) => return Ok(Flow::Exit),
                Ok(SiteInput::Back) => return Ok(Flow::Back),
                Ok(SiteInput::Select(index)) => self.show_nearby(&sites[index]).await?,
                Err(e) => self.screen.error(e)?,
            }
        }
    }

    async fn show_nearby(&mut self, site: &SiteRecord) -> Result<()> {
        if !site.has_postal_code() {
            self.screen.error(format!("{} has no zip code", site.name))?;
            return Ok(());
        }

        let client = match &self.places {
            Ok(client) => client,
            Err(e) => {
                self.screen.error(e)?;
                return Ok(());
            }
        };

        match client.fetch_nearby(&mut self.cache, &site.postal_code).await {
            Ok(places) => self.screen.places(site, &places)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    /// Print a recoverable error, or hand a fatal one back to the caller.
    fn report(&mut self, err: Error) -> Result<()> {
        if err.is_fatal() {
            return Err(err.into());
        }
        tracing::debug!(error = %err, "operation failed");
        self.screen.error(err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompt;
    use async_trait::async_trait;
    use nps_client::PlacesConfig;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    const BASE: &str = "https://www.nps.gov";
    const PLACES_URL: &str = "http://places.test/radius";

    #[derive(Default)]
    struct Pages {
        text: HashMap<String, String>,
        json: HashMap<String, Value>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for Pages {
        async fn get_text(&self, url: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.get(url).cloned().ok_or_else(|| Error::HttpError(format!("status 404 for {url}")))
        }

        async fn get_json(&self, url: &str, _query: &[(&str, String)]) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.json.get(url).cloned().ok_or_else(|| Error::HttpError(format!("status 404 for {url}")))
        }
    }

    fn site_page(name: &str, address: &str) -> String {
        format!(
            r#"<html><body>
            <div class="Hero-titleContainer"><a class="Hero-title">{name}</a>
            <div class="Hero-designationContainer"><span class="Hero-designation">National Park</span></div></div>
            {address}
            </body></html>"#
        )
    }

    fn pages() -> Pages {
        let mut pages = Pages::default();
        pages.text.insert(
            "https://www.nps.gov/".into(),
            r#"<div class="SearchBar-keywordSearch input-group input-group-lg">
                <ul class="dropdown-menu SearchBar-keywordSearch"><li><a href="/state/mi/index.htm">Michigan</a></li></ul>
            </div>"#
                .into(),
        );
        pages.text.insert(
            "https://www.nps.gov/state/mi/index.htm".into(),
            r#"<div id="parkListResultsArea"><ul>
                <li><h3><a href="/isro/index.htm">Isle Royale</a></h3></li>
                <li><h3><a href="/kewe/index.htm">Keweenaw</a></h3></li>
            </ul></div>"#
                .into(),
        );
        pages.text.insert(
            "https://www.nps.gov/isro/index.htm".into(),
            site_page(
                "Isle Royale",
                r#"<div itemprop="address"><p><span itemprop="addressLocality">Houghton</span>
                <span itemprop="addressRegion">MI</span><span itemprop="postalCode">49931</span></p></div>"#,
            ),
        );
        pages.text.insert("https://www.nps.gov/kewe/index.htm".into(), site_page("Keweenaw", ""));
        pages.json.insert(
            PLACES_URL.into(),
            json!({"info": {"statuscode": 0}, "searchResults": [
                {"fields": {"name": "Keweenaw Brewing Co", "group_sic_code_name_ext": "Breweries",
                            "address": "408 Shelden Ave", "city": "Houghton"}}
            ]}),
        );
        pages
    }

    async fn session(script: &str, api_key: &str) -> (String, CacheStats) {
        let tmp = tempdir().unwrap();
        let fetcher = Arc::new(pages());
        let directory = SiteDirectory::new(fetcher.clone(), BASE).unwrap();
        let places = PlacesClient::new(
            fetcher.clone(),
            PlacesConfig { api_key: api_key.to_string(), base_url: PLACES_URL.to_string() },
        );
        let cache = CacheStore::load(tmp.path().join("cache.json"));
        let prompt = Box::new(LinePrompt::new(Cursor::new(script.to_string()), std::io::sink()));

        let mut controller = Controller::new(directory, places, cache, prompt, Screen::plain(Vec::new()));
        controller.run().await.unwrap();

        let out = String::from_utf8(controller.screen().output().clone()).unwrap();
        (out, controller.cache_stats())
    }

    #[tokio::test]
    async fn test_full_session() {
        let (out, _) = session("Michigan\n1\nback\nexit\n", "k").await;

        assert!(out.contains("List of national sites in Michigan\n"));
        assert!(out.contains("[1] Isle Royale (National Park): Houghton, MI 49931\n"));
        assert!(out.contains("[2] Keweenaw (National Park): No address No zipcode\n"));
        assert!(out.contains("Places near Isle Royale\n"));
        assert!(out.contains(" - Keweenaw Brewing Co (Breweries): 408 Shelden Ave, Houghton\n"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_invalid_inputs_reprompt() {
        let (out, _) = session("atlantis\nmichigan\nseven\n9\nexit\n", "k").await;

        assert!(out.contains("Enter a proper state or territory name!"));
        assert!(out.contains(r#"[Error] You must choose a number or "exit" or "back""#));
        assert!(out.contains("[Error] Choose a number within the list range"));
        assert!(!out.contains("Places near"));
    }

    #[tokio::test]
    async fn test_site_without_zip_skips_search() {
        let (out, stats) = session("michigan\n2\nexit\n", "k").await;

        assert!(out.contains("[Error] Keweenaw has no zip code"));
        assert_eq!(stats.misses, 4);
    }

    #[tokio::test]
    async fn test_missing_api_key_reported() {
        let (out, _) = session("michigan\n1\nexit\n", "").await;
        assert!(out.contains("[Error] PLACES_AUTH_ERROR"));
    }

    #[tokio::test]
    async fn test_repeat_region_served_from_cache() {
        let (_, stats) = session("michigan\nback\nmichigan\nexit\n", "k").await;
        assert_eq!(stats.misses, 4);
        assert_eq!(stats.hits, 3);
    }

    #[tokio::test]
    async fn test_end_of_input_is_exit() {
        let (out, _) = session("michigan\n", "k").await;
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_unknown_region_page_is_not_fatal() {
        let tmp = tempdir().unwrap();
        let mut fetcher = pages();
        fetcher.text.remove("https://www.nps.gov/state/mi/index.htm");
        let fetcher = Arc::new(fetcher);

        let directory = SiteDirectory::new(fetcher.clone(), BASE).unwrap();
        let places = PlacesClient::new(fetcher, PlacesConfig::default());
        let cache = CacheStore::load(tmp.path().join("cache.json"));
        let prompt = Box::new(LinePrompt::new(Cursor::new("michigan\nexit\n".to_string()), std::io::sink()));

        let mut controller = Controller::new(directory, places, cache, prompt, Screen::plain(Vec::new()));
        controller.run().await.unwrap();

        let out = String::from_utf8(controller.screen().output().clone()).unwrap();
        assert!(out.contains("[Error] HTTP_ERROR: status 404"));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
