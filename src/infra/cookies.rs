//! Cookie persistence for the API key and search configuration.
//!
//! Values are stored as base64-encoded JSON with a fixed expiry. The cookies
//! are not signed; they only ever hold data the same user supplied.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub const API_KEY_COOKIE: &str = "api_key";
pub const CONFIG_COOKIE: &str = "config";

#[derive(Error, Debug)]
pub enum CookieError {
    #[error("Failed to encode cookie value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Cookie '{name}' is not valid base64: {source}")]
    Base64 {
        name: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Cookie '{name}' does not hold the expected JSON: {source}")]
    Json {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CookieCodec {
    name: &'static str,
    max_age_secs: i64,
    secure: bool,
}

impl CookieCodec {
    pub fn new(name: &'static str, max_age_secs: i64, secure: bool) -> Self {
        Self {
            name,
            max_age_secs,
            secure,
        }
    }

    /// Full `Set-Cookie` header value carrying `value`.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CookieError> {
        let json = serde_json::to_vec(value).map_err(CookieError::Encode)?;
        let encoded = percent_escape(&STANDARD.encode(json));
        Ok(self.header(&encoded, self.max_age_secs))
    }

    /// `Set-Cookie` header value that removes the cookie.
    pub fn clear(&self) -> String {
        self.header("", 0)
    }

    /// Reads this cookie out of a `Cookie` request header.
    ///
    /// `Ok(None)` when the header or the cookie is absent (or empty); an
    /// error when it is present but cannot be decoded.
    pub fn parse<T: DeserializeOwned>(&self, header: Option<&str>) -> Result<Option<T>, CookieError> {
        let Some(raw) = header.and_then(|h| find_cookie(h, self.name)) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let bytes = STANDARD
            .decode(percent_unescape(raw))
            .map_err(|source| CookieError::Base64 {
                name: self.name,
                source,
            })?;
        let value = serde_json::from_slice(&bytes).map_err(|source| CookieError::Json {
            name: self.name,
            source,
        })?;
        Ok(Some(value))
    }

    fn header(&self, value: &str, max_age_secs: i64) -> String {
        let expires = (Utc::now() + Duration::seconds(max_age_secs))
            .format("%a, %d %b %Y %H:%M:%S GMT");
        let mut header = format!(
            "{}={}; Max-Age={}; Expires={}; Path=/; HttpOnly; SameSite=Lax",
            self.name, value, max_age_secs, expires
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

// Base64 padding and symbols are escaped so the value survives strict
// cookie parsers.
fn percent_escape(value: &str) -> String {
    value
        .replace('+', "%2B")
        .replace('/', "%2F")
        .replace('=', "%3D")
}

fn percent_unescape(value: &str) -> String {
    value
        .replace("%2B", "+")
        .replace("%2b", "+")
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%3D", "=")
        .replace("%3d", "=")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Journal, Mode, SearchConfig, TimeRange};
    use pretty_assertions::assert_eq;

    fn value_part(set_cookie: &str) -> &str {
        set_cookie.split(';').next().unwrap()
    }

    #[test]
    fn search_config_round_trips_through_the_cookie() {
        let codec = CookieCodec::new(CONFIG_COOKIE, 3600, true);
        let config = SearchConfig {
            mode: Mode::Discover,
            time_range: TimeRange::Year,
            claims_to_analyze: 7,
            products_per_influencer: 2,
            include_revenue_analysis: false,
            verify_with_journals: true,
            selected_journals: vec![Journal::new("Cell", true), Journal::new("Nature", false)],
            notes: "sleep + longevity / über".to_string(),
        };

        let set_cookie = codec.serialize(&config).unwrap();
        let request_header = format!("theme=dark; {}", value_part(&set_cookie));
        let parsed: Option<SearchConfig> = codec.parse(Some(&request_header)).unwrap();

        assert_eq!(parsed, Some(config));
    }

    #[test]
    fn set_cookie_carries_fixed_attributes() {
        let header = CookieCodec::new(API_KEY_COOKIE, 604800, true)
            .serialize("sk-test")
            .unwrap();
        assert!(header.starts_with("api_key="));
        assert!(header.contains("Max-Age=604800"));
        assert!(header.contains("Expires="));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.ends_with("; Secure"));

        let insecure = CookieCodec::new(API_KEY_COOKIE, 60, false).serialize("sk-test").unwrap();
        assert!(!insecure.contains("Secure"));
    }

    #[test]
    fn absent_or_cleared_cookie_is_none() {
        let codec = CookieCodec::new(API_KEY_COOKIE, 60, true);
        let none: Option<String> = codec.parse(None).unwrap();
        assert_eq!(none, None);

        let other: Option<String> = codec.parse(Some("config=abc")).unwrap();
        assert_eq!(other, None);

        let cleared = codec.clear();
        assert!(cleared.contains("Max-Age=0"));
        let after_clear: Option<String> = codec.parse(Some(value_part(&cleared))).unwrap();
        assert_eq!(after_clear, None);
    }

    #[test]
    fn garbage_cookie_is_an_error() {
        let codec = CookieCodec::new(CONFIG_COOKIE, 60, true);
        let result: Result<Option<SearchConfig>, _> = codec.parse(Some("config=!!!not-base64"));
        assert!(matches!(result, Err(CookieError::Base64 { .. })));

        let not_json = format!("config={}", STANDARD.encode("plain"));
        let result: Result<Option<SearchConfig>, _> = codec.parse(Some(&not_json));
        assert!(matches!(result, Err(CookieError::Json { .. })));
    }
}
