//! Small helpers over `scraper` shared by the page parsers.

use scraper::{ElementRef, Selector};

/// Parse a selector literal known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// First descendant of `scope` matching `css`, in document order.
pub(crate) fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope.select(&selector(css)).next()
}

/// Inner text of an element with runs of whitespace collapsed and ends trimmed.
pub(crate) fn inner_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`inner_text`], but treats an element with no visible text as absent.
pub(crate) fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    Some(inner_text(element)).filter(|t| !t.is_empty())
}
