use serde::{Deserialize, Serialize};

use super::lenient;

/// Profile manufactured by the model for one influencer. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub products: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub revenue: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub followers: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trust: String,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(default, deserialize_with = "lenient::text")]
    pub claim: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trust: String,
    #[serde(default)]
    pub original_source: OriginalSource,
    #[serde(default)]
    pub verification_sources: Vec<VerificationSource>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(
        default,
        rename = "created_at",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OriginalSource {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VerificationSource {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: String,
}

/// What an analysis request produced.
///
/// The prompt tells the model to answer `{"error": "..."}` when it cannot
/// comply; that shape is tried first so it never decodes as an empty profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Unavailable { error: String },
    Profile(InfluencerRecord),
}

impl Claim {
    pub fn is_verified(&self) -> bool {
        self.status.eq_ignore_ascii_case("verified")
    }
}

impl InfluencerRecord {
    pub fn verified_claims(&self) -> usize {
        self.claims.iter().filter(|c| c.is_verified()).count()
    }
}
