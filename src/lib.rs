pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod llm;
pub mod prompts;
pub mod server;

pub use error::GatewayError;
