//! Stateless helpers for record URLs. No I/O.

use crate::config::API_BASE_URL;

/// Length of a store-assigned record identifier.
pub const RECORD_ID_LEN: usize = 24;

/// Extracts the trailing 24-character hexadecimal record id from a URL.
///
/// Matching is case-insensitive. Returns `None` for an empty input or when
/// the last 24 characters are not all hex digits.
///
/// ```rust
/// use living_inventory::extract_record_id;
///
/// let url = "https://my.living-apps.de/rest/apps/698494eea42675c0592289b9/records/698494eea42675c0592289c1";
/// assert_eq!(extract_record_id(Some(url)), Some("698494eea42675c0592289c1"));
/// assert_eq!(extract_record_id(Some("https://example.com/records/xyz")), None);
/// assert_eq!(extract_record_id(None), None);
/// ```
pub fn extract_record_id(url: Option<&str>) -> Option<&str> {
    let url = url?;
    if url.len() < RECORD_ID_LEN {
        return None;
    }

    let start = url.len() - RECORD_ID_LEN;
    if !url.is_char_boundary(start) {
        return None;
    }

    let tail = &url[start..];
    if tail.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(tail)
    } else {
        None
    }
}

/// Canonical URL of one record against the default store base URL.
pub fn create_record_url(collection_id: &str, record_id: &str) -> String {
    format!("{API_BASE_URL}/apps/{collection_id}/records/{record_id}")
}
