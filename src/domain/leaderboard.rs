use serde::{Deserialize, Serialize};

use super::{lenient, slug::slugify};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardRecord>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub total_verified_claims: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub average_trust_score: String,
}

/// What the leaderboard prompt produced: the board, or the model's own
/// `{"error": "..."}` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeaderboardOutcome {
    Unavailable {
        #[serde(deserialize_with = "lenient::text")]
        error: String,
    },
    Board(Leaderboard),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRecord {
    #[serde(default, deserialize_with = "lenient::count")]
    pub rank: u64,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trust_score: String,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default, deserialize_with = "lenient::text")]
    pub followers: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub verified_claims: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    #[serde(other)]
    Flat,
}

impl LeaderboardOutcome {
    pub fn normalize(self) -> Self {
        match self {
            Self::Board(board) => Self::Board(board.normalize()),
            unavailable => unavailable,
        }
    }
}

impl Leaderboard {
    /// Fills gaps the model commonly leaves: missing slugs and ranks.
    pub fn normalize(mut self) -> Self {
        for (index, record) in self.leaderboard.iter_mut().enumerate() {
            record.slug = if record.slug.trim().is_empty() {
                slugify(&record.name)
            } else {
                slugify(&record.slug)
            };
            if record.rank == 0 {
                record.rank = index as u64 + 1;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_derives_missing_slugs_and_ranks() {
        let board: Leaderboard = serde_json::from_str(
            r#"{
                "leaderboard": [
                    {"rank": 1, "slug": "peter-attia", "name": "Peter Attia", "trustScore": 94, "trend": "up", "followers": "1.2M", "verifiedClaims": "120"},
                    {"name": "Rhonda Patrick", "trustScore": "91%", "trend": "sideways", "verifiedClaims": 80}
                ],
                "totalVerifiedClaims": 200,
                "averageTrustScore": "92.5"
            }"#,
        )
        .unwrap();

        let board = board.normalize();
        assert_eq!(board.leaderboard[0].slug, "peter-attia");
        assert_eq!(board.leaderboard[0].trend, Trend::Up);
        assert_eq!(board.leaderboard[0].verified_claims, 120);
        assert_eq!(board.leaderboard[1].slug, "rhonda-patrick");
        assert_eq!(board.leaderboard[1].rank, 2);
        assert_eq!(board.leaderboard[1].trend, Trend::Flat);
        assert_eq!(board.total_verified_claims, "200");
        assert_eq!(board.average_trust_score, "92.5");
    }

    #[test]
    fn error_fallback_is_unavailable_not_an_empty_board() {
        let outcome: LeaderboardOutcome =
            serde_json::from_str(r#"{"error": "Unable to generate leaderboard"}"#).unwrap();
        assert_eq!(
            outcome,
            LeaderboardOutcome::Unavailable {
                error: "Unable to generate leaderboard".to_string()
            }
        );

        let outcome: LeaderboardOutcome =
            serde_json::from_str(r#"{"leaderboard": [], "totalVerifiedClaims": 0}"#).unwrap();
        assert!(matches!(outcome, LeaderboardOutcome::Board(_)));
    }
}
