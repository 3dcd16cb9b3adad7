use tracing::{info, warn};

use crate::domain::{slugify, AnalysisOutcome, LeaderboardOutcome, Mode, SearchConfig};
use crate::error::GatewayError;
use crate::llm::LLMClient;
use crate::prompts;

const ANALYSIS_MAX_TOKENS: u32 = 2000;

/// The three influencer queries, each one completion round-trip.
///
/// Holds no per-user state: the API key and search configuration are passed
/// into every call.
#[derive(Clone)]
pub struct InfluencerAnalyst {
    client: LLMClient,
    analysis_max_tokens: u32,
}

impl InfluencerAnalyst {
    pub fn new(client: LLMClient) -> Self {
        Self {
            client,
            analysis_max_tokens: ANALYSIS_MAX_TOKENS,
        }
    }

    pub fn with_analysis_max_tokens(mut self, max_tokens: u32) -> Self {
        self.analysis_max_tokens = max_tokens;
        self
    }

    /// Asks the model for an influencer's slug.
    ///
    /// `Ok(None)` is the not-found signal: the model answered with the
    /// sentinel, with nothing usable, or with text that slugifies to nothing.
    pub async fn resolve_slug(
        &self,
        influencer_name: &str,
        mode: Mode,
        api_key: &str,
    ) -> Result<Option<String>, GatewayError> {
        let prompt = prompts::find_influencer_prompt(influencer_name.trim(), mode);

        let text = match self.client.complete(&prompt, api_key, None).await {
            Ok(text) => text,
            Err(GatewayError::EmptyResponse) => return Ok(None),
            Err(e) => return Err(e),
        };

        if prompts::is_not_found(&text) {
            info!(influencer = influencer_name, %mode, "influencer not found");
            return Ok(None);
        }

        let slug = slugify(&text);
        if slug.is_empty() {
            warn!(response = %text, "slug lookup returned nothing usable");
            return Ok(None);
        }
        Ok(Some(slug))
    }

    pub async fn analyze_influencer(
        &self,
        influencer_name: &str,
        config: &SearchConfig,
        api_key: &str,
    ) -> Result<AnalysisOutcome, GatewayError> {
        let prompt = prompts::analyze_influencer_prompt(influencer_name, config);
        self.client
            .complete_json(&prompt, api_key, Some(self.analysis_max_tokens))
            .await
    }

    pub async fn build_leaderboard(&self, api_key: &str) -> Result<LeaderboardOutcome, GatewayError> {
        let outcome: LeaderboardOutcome = self
            .client
            .complete_json(prompts::leaderboard_prompt(), api_key, None)
            .await?;
        if let LeaderboardOutcome::Unavailable { error } = &outcome {
            warn!(%error, "model declined to build the leaderboard");
        }
        Ok(outcome.normalize())
    }
}
