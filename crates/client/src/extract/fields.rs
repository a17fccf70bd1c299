//! Per-field extraction rules for park detail pages.
//!
//! Each function looks at the whole document on its own, so a missing phone
//! block never affects the address. Every rule returns `Option`; whether a
//! miss is fatal or becomes a sentinel is decided when the record is built.

use scraper::ElementRef;

use super::text::{first, inner_text, non_empty_text};

const DESIGNATION_CONTAINER: &str = ".Hero-designationContainer";
const DESIGNATION: &str = "span.Hero-designation";

const TITLE_CONTAINER: &str = ".Hero-titleContainer";

/// Title variants, most specific first. The first one with text wins, so a
/// long title that is present but empty falls back to the short title.
pub const NAME_STRATEGIES: &[&str] = &["a.Hero-title.-long", "a.Hero-title"];

const ADDRESS_CONTAINER: &str = r#"[itemprop="address"]"#;
const ADDRESS_LINE: &str = "p";
const CITY: &str = r#"span[itemprop="addressLocality"]"#;
const STATE: &str = r#"span[itemprop="addressRegion"]"#;
const POSTAL_CODE: &str = r#"span[itemprop="postalCode"]"#;

const CONTACT_CARD: &str = ".vcard";
const PHONE: &str = "span.tel";

/// Site designation such as "National Park". May legitimately be empty.
pub fn category(root: ElementRef<'_>) -> Option<String> {
    first(root, DESIGNATION_CONTAINER).and_then(|container| first(container, DESIGNATION)).map(inner_text)
}

/// Site name, from the first title variant that has text.
pub fn name(root: ElementRef<'_>) -> Option<String> {
    first(root, TITLE_CONTAINER).and_then(|container| first_match(container, NAME_STRATEGIES))
}

/// `"{city}, {state}"`, or `None` unless both parts are present.
pub fn address(root: ElementRef<'_>) -> Option<String> {
    let line = address_line(root)?;
    let city = first(line, CITY).and_then(non_empty_text)?;
    let state = first(line, STATE).and_then(non_empty_text)?;
    Some(format!("{city}, {state}"))
}

pub fn postal_code(root: ElementRef<'_>) -> Option<String> {
    address_line(root).and_then(|line| first(line, POSTAL_CODE)).and_then(non_empty_text)
}

pub fn phone(root: ElementRef<'_>) -> Option<String> {
    first(root, CONTACT_CARD).and_then(|card| first(card, PHONE)).and_then(non_empty_text)
}

/// Try `strategies` in order against `scope`; first non-empty text wins.
pub fn first_match(scope: ElementRef<'_>, strategies: &[&str]) -> Option<String> {
    strategies.iter().find_map(|css| first(scope, css).and_then(non_empty_text))
}

fn address_line(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first(root, ADDRESS_CONTAINER).and_then(|container| first(container, ADDRESS_LINE))
}
