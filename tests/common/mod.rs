#![allow(dead_code)]

use async_trait::async_trait;
use influscope::llm::{ChatRequest, CompletionBackend, LLMClient};
use influscope::GatewayError;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub enum Reply {
    Text(String),
    NoContent,
    Unauthorized,
}

/// Backend that answers every request with the same canned reply and
/// records what it was sent.
pub struct ScriptedBackend {
    reply: Reply,
    requests: Mutex<Vec<(ChatRequest, String)>>,
}

impl ScriptedBackend {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(ChatRequest, String)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn chat(&self, request: &ChatRequest, api_key: &str) -> Result<Option<String>, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), api_key.to_string()));

        match &self.reply {
            Reply::Text(text) => Ok(Some(text.clone())),
            Reply::NoContent => Ok(None),
            Reply::Unauthorized => Err(GatewayError::InvalidCredential),
        }
    }
}

pub fn client(backend: &Arc<ScriptedBackend>) -> LLMClient {
    LLMClient::new(backend.clone(), "gpt-3.5-turbo")
}

pub const PROFILE_JSON: &str = r#"{
  "name": "Andrew Huberman",
  "avatar": "https://example.com/huberman.jpg",
  "categories": ["Neuroscience", "Sleep", "Fitness"],
  "description": "Neuroscientist and podcast host.",
  "products": 3,
  "revenue": "$5M",
  "followers": "5.2M",
  "trust": "89%",
  "claims": [
    {
      "claim": "Morning sunlight exposure improves sleep",
      "category": "Sleep",
      "trust": "92%",
      "originalSource": {"description": "Podcast", "link": "https://example.com/ep"},
      "verificationSources": [{"name": "Nature", "description": "Circadian study", "link": "https://example.com/study"}],
      "status": "Verified"
    }
  ]
}"#;

pub const LEADERBOARD_JSON: &str = r#"```json
{
  "leaderboard": [
    {"rank": 1, "slug": "peter-attia", "name": "Peter Attia", "category": "Longevity", "trustScore": 94, "trend": "up", "followers": "1.2M", "verifiedClaims": 120},
    {"rank": 2, "name": "Rhonda Patrick", "category": "Nutrition", "trustScore": 91, "trend": "down", "followers": "980K", "verifiedClaims": 95}
  ],
  "totalVerifiedClaims": 215,
  "averageTrustScore": 92.5
}
```"#;
