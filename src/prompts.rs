//! All user-facing strings and prompts for influscope
//!
//! This module centralizes all text constants and prompt templates so the
//! wording sent to the model lives in one place.

use crate::domain::{slugify, Mode, SearchConfig};

// Response messages
pub const MSG_NO_API_KEY: &str = "No API key found.";
pub const MSG_INFLUENCER_NOT_FOUND: &str = "Influencer not found.";
pub const MSG_SOMETHING_WENT_WRONG: &str = "Something went wrong.";
pub const MSG_INVALID_API_KEY_FORMAT: &str = "Invalid API Key format.";
pub const MSG_COOKIE_PARSE_FAILED: &str = "Failed to parse cookie";
pub const MSG_INVALID_CONFIG: &str = "Invalid search configuration.";

// CLI messages
pub const MSG_CONFIG_CREATED: &str = "✓ Configuration created";
pub const MSG_CONFIG_EXISTS: &str = "Configuration already exists";
pub const MSG_API_KEY_INSTRUCTION: &str =
    "Set this environment variable or pass --api-key:\n  export OPENAI_API_KEY=sk-...";

// Configuration File Content
pub const DEFAULT_CONFIG_CONTENT: &str = r#"# influscope configuration

bind_address: 127.0.0.1
port: 3000
model: gpt-3.5-turbo          # chat completion model used for every request
api_base_url: https://api.openai.com/v1
analysis_max_tokens: 2000
cookie_max_age_secs: 604800   # one week
secure_cookies: true          # set to false when serving plain http locally
"#;

/// Exact text the model is told to answer with when no slug can be found.
pub const NOT_FOUND_SENTINEL: &str = "Influencer not found";

/// Prefix every OpenAI secret key starts with.
pub const API_KEY_PREFIX: &str = "sk-";

pub fn find_influencer_prompt(influencer_name: &str, mode: Mode) -> String {
    let (task, missing) = match mode {
        Mode::Specific => (
            format!(
                "find the slug (unique identifier) of the influencer named \"{influencer_name}\"."
            ),
            "the influencer is not found,",
        ),
        Mode::Discover => (
            "find a random influencer in the health-related domain.".to_string(),
            "no influencer can be discovered,",
        ),
    };

    format!(
        r#"You are a database of influencers. Your task is to {task}

Respond ONLY with the slug as plain text, without any additional formatting.
If {missing} respond with "{NOT_FOUND_SENTINEL}"."#
    )
}

pub fn analyze_influencer_prompt(influencer_name: &str, config: &SearchConfig) -> String {
    let revenue = if config.include_revenue_analysis {
        "Include revenue analysis based on the influencer's online presence and associated content."
    } else {
        "Exclude revenue analysis."
    };

    let journals = if config.verify_with_journals {
        format!(
            "- Cross-reference these claims against the following scientific journals: {}. Ensure journal references are included in the response.",
            config.active_journals().join(", ")
        )
    } else {
        "- Do not perform cross-referencing against scientific journals.".to_string()
    };

    let notes = if config.notes.trim().is_empty() {
        String::new()
    } else {
        format!("\n4. Additional notes from the researcher:\n   {}\n", config.notes.trim())
    };

    format!(
        r#"You are an AI system specialized in analyzing influencer content. Your task is to analyze the influencer "{name}" based on recent data, including tweets, podcast transcripts, and online profiles. Your analysis must follow these requirements:

1. Influencer Information:
   - **Name**: "{name}"
   - **Avatar**: Real link to the influencer's profile picture. If not found, return an empty string.
   - **Categories**: List 5-10 topics or fields this influencer specializes in.
   - **Description**: A concise biography (max 1000 characters).
   - **Products**: Analyze up to {products} associated products.
   - **Yearly Revenue**: Estimated yearly revenue (e.g., "$5M"). {revenue}
   - **Followers**: Total number of followers across platforms.
   - **Overall Trust Score**: Calculate an average trust score.

2. Claims Analysis:
   - Analyze recent tweets and podcast transcripts within the time range "{range}".
   - Provide up to {claims} unique claims. For each claim, include:
     - **Claim text**: The unique health-related claim.
     - **Category**: E.g., Nutrition, Medicine, Mental Health.
     - **Trust Score**: A percentage (e.g., 85%).
     - **Original Source**: Include a description and link.
     - **Verification Sources**: If applicable, provide journal references.
     - **Verification Status**: One of "Verified", "Questionable", or "Debunked".
     {journals}

3. Output:
   - Return the result **only as valid JSON** in the following format:
   {{
     "name": "...",
     "avatar": "...",
     "categories": ["...", "..."],
     "description": "...",
     "products": 0,
     "revenue": "$...",
     "followers": "...M",
     "trust": "...%",
     "claims": [
       {{
         "claim": "...",
         "category": "...",
         "trust": "...%",
         "originalSource": {{ "description": "...", "link": "..." }},
         "verificationSources": [{{ "name": "...", "description": "...", "link": "..." }}],
         "status": "..."
       }}
     ]
   }}
   - If you cannot fulfill the request, return: {{"error": "Unable to process request"}}.
{notes}"#,
        name = influencer_name,
        products = config.products_per_influencer,
        revenue = revenue,
        range = config.time_range.describe(),
        claims = config.claims_to_analyze,
        journals = journals,
        notes = notes,
    )
}

pub fn leaderboard_prompt() -> &'static str {
    r#"You are an AI assistant tasked with identifying and analyzing 50 REAL well-known health influencers based on your extensive knowledge. Generate a leaderboard of real health influencers, ensuring the data appears credible and relevant. Focus on influencers known for their expertise in health-related fields, such as Nutrition, Medicine, Mental Health, Fitness, Neuroscience, and Longevity.

Provide the following structure:

{
  "leaderboard": [
    {
      "rank": 1,
      "avatar": "URL of the avatar image (realistic representation of the influencer)",
      "slug": "Unique identifier of the influencer",
      "name": "Full name of the influencer",
      "category": "Main category (e.g., Nutrition, Medicine, etc.)",
      "trustScore": Trust score as a percentage (e.g., 95),
      "trend": "up or down (trend of trust score)",
      "followers": "Number of followers in shorthand format (e.g., 1.2M, 980K, etc.)",
      "verifiedClaims": Number of verified claims
    }
  ],
  "totalVerifiedClaims": "Total number of verified claims across all influencers",
  "averageTrustScore": "Average trust score across all influencers as a percentage"
}

Guidelines:
1. Use influencers who are publicly recognized and known in the health industry.
2. Generate realistic and relevant follower counts (e.g., 100K-5M+), trust scores (80%-100%), and verified claims.
3. Ensure the names, categories, and metrics are credible.
4. If you are unable to generate accurate results, provide a fallback JSON structure with an error message.

Only return valid JSON with no additional text or comments."#
}

/// True when the slug lookup answered with the not-found sentinel.
///
/// Quoting, case and punctuation around the sentinel are ignored.
pub fn is_not_found(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || slugify(text) == slugify(NOT_FOUND_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TimeRange, Journal};

    #[test]
    fn find_prompt_depends_on_mode() {
        let specific = find_influencer_prompt("Andrew Huberman", Mode::Specific);
        assert!(specific.contains("named \"Andrew Huberman\""));
        assert!(specific.contains("If the influencer is not found,"));

        let discover = find_influencer_prompt("ignored", Mode::Discover);
        assert!(discover.contains("random influencer in the health-related domain"));
        assert!(!discover.contains("ignored"));
    }

    #[test]
    fn analyze_prompt_lists_only_active_journals() {
        let mut config = SearchConfig::default();
        config.selected_journals = vec![
            Journal::new("Science", true),
            Journal::new("Cell", false),
            Journal::new("Nature", true),
        ];
        let prompt = analyze_influencer_prompt("Peter Attia", &config);
        assert!(prompt.contains("scientific journals: Science, Nature."));
        assert!(!prompt.contains("Cell"));
        assert!(prompt.contains("the last month"));
        assert!(prompt.contains("up to 50 unique claims"));
    }

    #[test]
    fn analyze_prompt_respects_toggles() {
        let config = SearchConfig {
            verify_with_journals: false,
            include_revenue_analysis: false,
            time_range: TimeRange::All,
            notes: "Focus on supplements".to_string(),
            ..SearchConfig::default()
        };
        let prompt = analyze_influencer_prompt("Peter Attia", &config);
        assert!(prompt.contains("Do not perform cross-referencing"));
        assert!(prompt.contains("Exclude revenue analysis."));
        assert!(prompt.contains("\"all time\""));
        assert!(prompt.contains("Focus on supplements"));
    }

    #[test]
    fn sentinel_detection_is_lenient() {
        assert!(is_not_found("Influencer not found"));
        assert!(is_not_found("  influencer NOT found.\n"));
        assert!(is_not_found(""));
        assert!(is_not_found("\"Influencer not found.\""));
        assert!(is_not_found("'Influencer not found'"));
        assert!(is_not_found("`Influencer not found!`"));
        assert!(!is_not_found("andrew-huberman"));
    }
}
