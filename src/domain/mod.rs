pub mod config;
pub mod influencer;
pub mod leaderboard;
pub mod lenient;
pub mod slug;

pub use config::{Journal, Mode, SearchConfig, TimeRange};
pub use influencer::{AnalysisOutcome, Claim, InfluencerRecord, OriginalSource, VerificationSource};
pub use leaderboard::{Leaderboard, LeaderboardOutcome, LeaderboardRecord, Trend};
pub use slug::{encode_path_segment, slugify, unslugify};
