//! Canonical cache key generation for parameterized requests.

/// Separator between the endpoint and each `name-value` pair.
pub const KEY_DELIMITER: &str = "_";

/// Build a deterministic cache key for a parameterized request.
///
/// Parameters are sorted by name (then value), formatted as `name-value` and
/// appended to the endpoint, all joined by [`KEY_DELIMITER`]. Two requests with
/// the same endpoint and parameter set produce the same key regardless of the
/// order the parameters were supplied in.
///
/// `%` and `_` inside names and values are percent-encoded, so distinct
/// parameter sets never share a key. `-` is left alone.
///
/// ```
/// use nps_core::cache::canonical_key;
///
/// let key = canonical_key("http://host/radius", [("units", "m"), ("origin", "49931")]);
/// assert_eq!(key, "http://host/radius_origin-49931_units-m");
/// ```
pub fn canonical_key<I, K, V>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> =
        params.into_iter().map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())).collect();
    pairs.sort();

    let mut key = endpoint.to_string();
    for (name, value) in &pairs {
        key.push_str(KEY_DELIMITER);
        key.push_str(&escape(name));
        key.push('-');
        key.push_str(&escape(value));
    }
    key
}

fn escape(part: &str) -> String {
    part.replace('%', "%25").replace('_', "%5F")
}
