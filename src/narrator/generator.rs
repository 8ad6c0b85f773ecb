use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::utils::constants::DEFAULT_MAX_NEW_TOKENS;

/// Capability boundary for the pretrained model: prompt in, continuation out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// Client for a text-generation-inference style HTTP endpoint
pub struct HttpTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    max_new_tokens: u32,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
        }
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.max_new_tokens,
                // The response marker lives in the prompt, so the full text
                // must come back with the continuation
                return_full_text: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::Generation(format!(
                "model endpoint returned {}",
                response.status()
            )));
        }

        let mut candidates: Vec<GenerateResponse> = response.json().await?;
        if candidates.is_empty() {
            return Err(PipelineError::Generation(
                "model endpoint returned no candidates".to_string(),
            ));
        }

        Ok(candidates.remove(0).generated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_posts_prompt_and_reads_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({"inputs": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"generated_text": "hello world"}
            ])))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(format!("{}/generate", server.uri()));
        let text = generator.generate("hello").await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_generate_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(format!("{}/generate", server.uri()));
        let err = generator.generate("hello").await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_candidate_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(format!("{}/generate", server.uri()));
        assert!(generator.generate("hello").await.is_err());
    }
}
