use thiserror::Error;

/// Failure of a single completion round-trip.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key found. Save an OpenAI key before searching.")]
    MissingCredential,

    #[error("Invalid API key. The provider rejected the supplied credential.")]
    InvalidCredential,

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No response content received from the model")]
    EmptyResponse,

    #[error("Model response is not valid JSON: {reason}")]
    NotJson { content: String, reason: String },

    #[error("Influencer not found")]
    NotFound,
}

impl GatewayError {
    /// Short machine-readable tag, used in logs and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidCredential => "invalid_credential",
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
            Self::EmptyResponse => "empty_response",
            Self::NotJson { .. } => "not_json",
            Self::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(GatewayError::MissingCredential.kind(), "missing_credential");
        assert_eq!(GatewayError::EmptyResponse.kind(), "empty_response");
        assert_eq!(
            GatewayError::NotJson {
                content: "x".into(),
                reason: "y".into()
            }
            .kind(),
            "not_json"
        );
    }

    #[test]
    fn api_error_message_includes_status() {
        let err = GatewayError::Api {
            status: 429,
            message: "Rate limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "LLM API error (429): Rate limit exceeded");
    }
}
