//! HTTP utilities for gateway communication

use crate::{cli::types::AccessKey, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Header the gateway reads the member's access key from.
pub const ACCESS_KEY_HEADER: &str = "accesskey";

/// Build the request headers carrying the member's access key.
pub fn access_key_header_map(key: &AccessKey) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut value = HeaderValue::from_str(key.as_str())?;
    value.set_sensitive(true);
    h.insert(ACCESS_KEY_HEADER, value);
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_key_header_map() {
        let headers = access_key_header_map(&AccessKey::new("abc123")).unwrap();

        assert!(headers.contains_key(ACCEPT));
        assert_eq!(headers.get(ACCESS_KEY_HEADER).unwrap(), "abc123");
        assert!(headers.get(ACCESS_KEY_HEADER).unwrap().is_sensitive());
    }

    #[test]
    fn test_access_key_header_map_rejects_newlines() {
        let result = access_key_header_map(&AccessKey::new("bad\nkey"));
        assert!(result.is_err());
    }
}
