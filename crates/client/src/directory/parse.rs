//! Link harvesting from the directory home page and region pages.

use scraper::{ElementRef, Html};
use url::Url;

use crate::extract::{first, inner_text, selector};
use crate::fetch::resolve_href;
use nps_core::Error;

const REGION_SEARCH_BAR: &str = ".SearchBar-keywordSearch.input-group.input-group-lg";
const REGION_MENU_CLASSES: &[&str] = &["dropdown-menu", "SearchBar-keywordSearch"];

const RESULTS_AREA: &str = "#parkListResultsArea";
const RESULTS_LIST: &str = "ul";
const SITE_HEADING: &str = "h3";
const SITE_LINK: &str = "a[href]";

/// Extract `(lowercase region name, absolute url)` pairs from the home page.
///
/// Only the dropdown menu that is a direct child of the search bar is read;
/// other menus on the page are ignored.
pub fn parse_region_links(html: &str, base: &Url) -> Result<Vec<(String, String)>, Error> {
    let document = Html::parse_document(html);

    let search_bar = first(document.root_element(), REGION_SEARCH_BAR)
        .ok_or_else(|| Error::ExtractFailed(format!("{REGION_SEARCH_BAR} not found")))?;

    let menu = search_bar
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "ul" && has_classes(*el, REGION_MENU_CLASSES))
        .ok_or_else(|| Error::ExtractFailed("region dropdown menu not found".into()))?;

    let link = selector(SITE_LINK);
    let mut regions = Vec::new();

    for anchor in menu.select(&link) {
        let name = inner_text(anchor).to_lowercase();
        let Some(href) = anchor.value().attr("href") else { continue };

        if name.is_empty() {
            tracing::debug!(href, "skipping unnamed region link");
            continue;
        }

        match resolve_href(base, href) {
            Ok(url) => regions.push((name, url)),
            Err(e) => tracing::debug!(href, error = %e, "skipping unresolvable region link"),
        }
    }

    Ok(regions)
}

/// Extract detail-page URLs from a region listing, in document order.
pub fn parse_site_links(html: &str, base: &Url) -> Result<Vec<String>, Error> {
    let document = Html::parse_document(html);

    let results = first(document.root_element(), RESULTS_AREA)
        .ok_or_else(|| Error::ExtractFailed(format!("{RESULTS_AREA} not found")))?;
    let list =
        first(results, RESULTS_LIST).ok_or_else(|| Error::ExtractFailed(format!("{RESULTS_AREA} has no list")))?;

    let heading = selector(SITE_HEADING);
    let mut urls = Vec::new();

    for h3 in list.select(&heading) {
        let Some(href) = first(h3, SITE_LINK).and_then(|a| a.value().attr("href")) else {
            tracing::debug!(heading = %inner_text(h3), "skipping heading without link");
            continue;
        };

        match resolve_href(base, href) {
            Ok(url) => urls.push(url),
            Err(e) => tracing::debug!(href, error = %e, "skipping unresolvable site link"),
        }
    }

    Ok(urls)
}

fn has_classes(element: ElementRef<'_>, wanted: &[&str]) -> bool {
    wanted.iter().all(|class| element.value().classes().any(|c| c == *class))
}
