use serde::{Deserialize, Serialize};
use std::fmt;

/// Search settings chosen by the user. Persisted wholesale as one JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub mode: Mode,
    pub time_range: TimeRange,
    pub claims_to_analyze: u32,
    pub products_per_influencer: u32,
    pub include_revenue_analysis: bool,
    pub verify_with_journals: bool,
    pub selected_journals: Vec<Journal>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Specific,
    Discover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

const DEFAULT_JOURNALS: &[(&str, bool)] = &[
    ("PubMed Central", true),
    ("Science", true),
    ("The Lancet", true),
    ("Nature", false),
    ("Cell", false),
    ("JAMA Network", false),
    ("New England Journal of Medicine", false),
];

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Specific,
            time_range: TimeRange::Month,
            claims_to_analyze: 50,
            products_per_influencer: 10,
            include_revenue_analysis: true,
            verify_with_journals: true,
            selected_journals: DEFAULT_JOURNALS
                .iter()
                .map(|(name, is_active)| Journal::new(*name, *is_active))
                .collect(),
            notes: String::new(),
        }
    }
}

impl SearchConfig {
    /// Names of the journals the user switched on, in their configured order.
    pub fn active_journals(&self) -> Vec<&str> {
        self.selected_journals
            .iter()
            .filter(|j| j.is_active)
            .map(|j| j.name.as_str())
            .collect()
    }
}

impl Journal {
    pub fn new(name: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            is_active,
        }
    }
}

impl TimeRange {
    /// Phrase used inside prompts and summaries.
    pub fn describe(&self) -> String {
        match self {
            TimeRange::All => "all time".to_string(),
            other => format!("the last {other}"),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Specific => f.write_str("specific"),
            Mode::Discover => f.write_str("discover"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_settings_form() {
        let config = SearchConfig::default();
        assert_eq!(config.mode, Mode::Specific);
        assert_eq!(config.time_range, TimeRange::Month);
        assert_eq!(config.claims_to_analyze, 50);
        assert_eq!(config.selected_journals.len(), 7);
        assert_eq!(
            config.active_journals(),
            vec!["PubMed Central", "Science", "The Lancet"]
        );
    }

    #[test]
    fn persisted_blob_uses_camel_case_keys() {
        let json = serde_json::to_value(SearchConfig::default()).unwrap();
        assert_eq!(json["timeRange"], "month");
        assert_eq!(json["claimsToAnalyze"], 50);
        assert_eq!(json["selectedJournals"][0]["isActive"], true);
    }

    #[test]
    fn partial_blob_falls_back_to_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"mode":"discover","timeRange":"all"}"#).unwrap();
        assert_eq!(config.mode, Mode::Discover);
        assert_eq!(config.time_range, TimeRange::All);
        assert_eq!(config.products_per_influencer, 10);
        assert!(config.verify_with_journals);
    }

    #[test]
    fn time_range_phrases() {
        assert_eq!(TimeRange::All.describe(), "all time");
        assert_eq!(TimeRange::Week.describe(), "the last week");
    }
}
