//! MapQuest radius search response types and normalization.

use serde::Deserialize;
use serde_json::Value;

use nps_core::Error;

pub const NO_NAME: &str = "no name";
pub const NO_CATEGORY: &str = "no category";
pub const NO_STREET_ADDRESS: &str = "no street address";
pub const NO_CITY: &str = "no city";

/// Raw response from the MapQuest radius search API.
#[derive(Debug, Default, Deserialize)]
pub struct PlacesApiResponse {
    #[serde(default)]
    pub info: Option<ApiInfo>,
    #[serde(default, rename = "searchResults")]
    pub search_results: Vec<ApiResult>,
}

/// Status block MapQuest attaches to every response.
#[derive(Debug, Default, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub statuscode: i64,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub fields: ApiFields,
}

/// The subset of result fields shown to the user. Absent and `null` both
/// deserialize to `None`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group_sic_code_name_ext: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// One point of interest near a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyPlace {
    pub name: String,
    pub category: String,
    pub street_address: String,
    pub city: String,
}

impl NearbyPlace {
    /// `"{name} ({category}): {street_address}, {city}"`
    pub fn info(&self) -> String {
        format!("{} ({}): {}, {}", self.name, self.category, self.street_address, self.city)
    }
}

impl From<ApiFields> for NearbyPlace {
    fn from(fields: ApiFields) -> Self {
        Self {
            name: or_sentinel(fields.name, NO_NAME),
            category: or_sentinel(fields.group_sic_code_name_ext, NO_CATEGORY),
            street_address: or_sentinel(fields.address, NO_STREET_ADDRESS),
            city: or_sentinel(fields.city, NO_CITY),
        }
    }
}

impl PlacesApiResponse {
    /// Normalized places, in response order.
    pub fn into_places(self) -> Vec<NearbyPlace> {
        self.search_results.into_iter().map(|r| NearbyPlace::from(r.fields)).collect()
    }
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).unwrap_or_else(|| sentinel.to_string())
}

/// Reject responses whose `info.statuscode` is non-zero.
///
/// A body without an `info` block is treated as success.
pub fn check_status(body: &Value) -> Result<(), Error> {
    let Some(info) = body.get("info") else { return Ok(()) };
    let code = info.get("statuscode").and_then(Value::as_i64).unwrap_or(0);

    if code == 0 {
        return Ok(());
    }

    let messages = info
        .get("messages")
        .and_then(Value::as_array)
        .map(|m| m.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; "))
        .unwrap_or_default();

    match code {
        401 | 403 => Err(Error::PlacesAuth(format!("status {code}: {messages}"))),
        _ => Err(Error::PlacesApi(format!("status {code}: {messages}"))),
    }
}

/// Decode a (cached) API body into places, in response order.
pub fn parse_places(body: Value) -> Result<Vec<NearbyPlace>, Error> {
    let raw: PlacesApiResponse =
        serde_json::from_value(body).map_err(|e| Error::Parse(format!("invalid places response: {e}")))?;

    if let Some(info) = &raw.info {
        tracing::debug!(statuscode = info.statuscode, results = raw.search_results.len(), "places response");
    }

    Ok(raw.into_places())
}
