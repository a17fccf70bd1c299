//! Client code for nps-explorer.
//!
//! This crate provides the HTTP fetch capability, park page extraction, the
//! park directory client and the nearby-places client used by the CLI.

pub mod directory;
pub mod extract;
pub mod fetch;
pub mod places;

#[cfg(test)]
mod testing;

pub use directory::{RegionDirectory, SiteDirectory};
pub use extract::{Extractor, NO_ADDRESS, NO_PHONE, NO_ZIPCODE, SiteExtractor, SiteRecord, extract_site};
pub use fetch::{FetchClient, FetchConfig, Fetcher};
pub use places::{NearbyPlace, PlacesClient, PlacesConfig, PlacesRequest};
