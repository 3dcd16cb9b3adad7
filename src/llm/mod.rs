pub mod analyst;
pub mod client;

pub use analyst::InfluencerAnalyst;
pub use client::{ChatMessage, ChatRequest, CompletionBackend, LLMClient, OpenAiBackend};
