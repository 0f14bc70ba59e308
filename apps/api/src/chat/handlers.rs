//! Axum route handler for the compliance chat endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::SamplingParams;
use crate::state::AppState;

use super::prompts::CHAT_SYSTEM_PROMPT;

/// Sampling for chat replies. Warmer than section analysis; answers are
/// conversational, not scored.
const CHAT_SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.7,
    max_tokens: 800,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat
///
/// Forwards the message to the model under the fixed persona and returns the
/// reply verbatim.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let response = state
        .llm
        .complete(CHAT_SYSTEM_PROMPT, &request.message, CHAT_SAMPLING)
        .await
        .map_err(|e| AppError::Llm(format!("Chat completion failed: {e}")))?;

    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::{CompletionClient, LlmError};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedReplyClient(&'static str);

    #[async_trait]
    impl CompletionClient for FixedReplyClient {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _params: SamplingParams,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn test_state(reply: &'static str) -> AppState {
        AppState {
            llm: Arc::new(FixedReplyClient(reply)),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                upload_dir: std::env::temp_dir().display().to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_before_any_model_call() {
        let state = test_state("should never be returned");
        for message in ["", "   "] {
            let result = handle_chat(
                State(state.clone()),
                Json(ChatRequest {
                    message: message.to_string(),
                }),
            )
            .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_reply_is_returned_verbatim() {
        let state = test_state("Substantial equivalence means the device is as safe and effective.");
        let result = handle_chat(
            State(state),
            Json(ChatRequest {
                message: "What is substantial equivalence?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            result.0.response,
            "Substantial equivalence means the device is as safe and effective."
        );
    }
}
