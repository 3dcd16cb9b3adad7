use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap};

use crate::domain::SearchConfig;
use crate::infra::cookies::{API_KEY_COOKIE, CONFIG_COOKIE};
use crate::infra::{CookieCodec, CookieError, ServerConfig};
use crate::llm::{InfluencerAnalyst, LLMClient};

pub struct AppState {
    pub config: ServerConfig,
    pub analyst: InfluencerAnalyst,
    pub api_key_cookie: CookieCodec,
    pub config_cookie: CookieCodec,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let client = LLMClient::openai(&config.api_base_url, &config.model);
        Self::with_client(config, client)
    }

    pub fn with_client(config: ServerConfig, client: LLMClient) -> Arc<Self> {
        let analyst =
            InfluencerAnalyst::new(client).with_analysis_max_tokens(config.analysis_max_tokens);
        let api_key_cookie =
            CookieCodec::new(API_KEY_COOKIE, config.cookie_max_age_secs, config.secure_cookies);
        let config_cookie =
            CookieCodec::new(CONFIG_COOKIE, config.cookie_max_age_secs, config.secure_cookies);

        Arc::new(Self {
            config,
            analyst,
            api_key_cookie,
            config_cookie,
        })
    }

    /// API key saved by this browser, if any. Blank keys count as absent.
    pub fn api_key(&self, headers: &HeaderMap) -> Result<Option<String>, CookieError> {
        let key: Option<String> = self.api_key_cookie.parse(cookie_header(headers).as_deref())?;
        Ok(key.filter(|k| !k.trim().is_empty()))
    }

    pub fn saved_search_config(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<SearchConfig>, CookieError> {
        self.config_cookie.parse(cookie_header(headers).as_deref())
    }

    /// Saved search configuration, or the defaults when none was saved.
    pub fn search_config(&self, headers: &HeaderMap) -> Result<SearchConfig, CookieError> {
        Ok(self.saved_search_config(headers)?.unwrap_or_default())
    }
}

fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}
