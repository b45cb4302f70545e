//! Hosted inference adapters.
//!
//! Talks to a Hugging Face style inference endpoint: one model per URL path,
//! JSON in, JSON out. Requests carry a per-call timeout and are retried with
//! exponential backoff on transport errors and 5xx responses (hosted models
//! answer 503 while they are being loaded).

use super::{EmotionClassifier, OracleError, SimilarityScorer};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const EMOTION_ORACLE: &str = "emotion classifier";
const SIMILARITY_ORACLE: &str = "similarity scorer";

#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub emotion_model: String,
    pub similarity_model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub attempts: usize,
}

pub struct InferenceClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    timeout: Duration,
    attempts: usize,
}

impl InferenceClient {
    pub fn new(settings: &RemoteSettings) -> Result<Self, OracleError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| OracleError::Request {
                oracle: "inference client",
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_token: settings.api_token.clone().filter(|t| !t.is_empty()),
            timeout: settings.timeout,
            attempts: settings.attempts.max(1),
        })
    }

    pub fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model.trim_start_matches('/'))
    }

    /// POSTs `payload` to `url` and decodes the JSON answer.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        oracle: &'static str,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, OracleError> {
        let mut delay_ms = 150u64;
        let mut last_error = None;

        for attempt in 0..self.attempts {
            if attempt > 0 {
                let jitter = rand::random::<u64>() % 50;
                tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                delay_ms = (delay_ms * 2).min(1200);
            }

            let mut request = self
                .http_client
                .post(url)
                .json(payload)
                .timeout(self.timeout);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!(
                        "{} attempt {}/{} failed: {}",
                        oracle,
                        attempt + 1,
                        self.attempts,
                        e
                    );
                    last_error = Some(OracleError::Request {
                        oracle,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let status = response.status();
            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(
                    "{} attempt {}/{} got HTTP {}",
                    oracle,
                    attempt + 1,
                    self.attempts,
                    status
                );
                last_error = Some(OracleError::Status {
                    oracle,
                    status: status.as_u16(),
                    body,
                });
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(OracleError::Status {
                    oracle,
                    status: status.as_u16(),
                    body,
                });
            }

            return response
                .json::<T>()
                .await
                .map_err(|e| OracleError::InvalidResponse {
                    oracle,
                    message: e.to_string(),
                });
        }

        Err(last_error.unwrap_or(OracleError::Request {
            oracle,
            message: "retry attempts exhausted".to_string(),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

// Text-classification endpoints answer either a flat list of label scores or
// one list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

pub struct RemoteEmotionClassifier {
    client: Arc<InferenceClient>,
    url: String,
}

impl RemoteEmotionClassifier {
    pub fn new(client: Arc<InferenceClient>, model: &str) -> Self {
        let url = client.model_url(model);
        Self { client, url }
    }
}

#[async_trait]
impl EmotionClassifier for RemoteEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<String, OracleError> {
        let response: ClassificationResponse = self
            .client
            .post_json(EMOTION_ORACLE, &self.url, &json!({ "inputs": text }))
            .await?;

        let candidates = match response {
            ClassificationResponse::Batched(mut batches) => {
                if batches.is_empty() {
                    Vec::new()
                } else {
                    batches.swap_remove(0)
                }
            }
            ClassificationResponse::Single(scores) => scores,
        };

        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|best| best.label.to_lowercase())
            .ok_or(OracleError::InvalidResponse {
                oracle: EMOTION_ORACLE,
                message: "no labels returned".to_string(),
            })
    }
}

pub struct RemoteSimilarityScorer {
    client: Arc<InferenceClient>,
    url: String,
}

impl RemoteSimilarityScorer {
    pub fn new(client: Arc<InferenceClient>, model: &str) -> Self {
        let url = client.model_url(model);
        Self { client, url }
    }
}

#[async_trait]
impl SimilarityScorer for RemoteSimilarityScorer {
    async fn similarity(
        &self,
        query: &str,
        references: &[String],
    ) -> Result<Vec<f32>, OracleError> {
        if references.is_empty() {
            return Ok(Vec::new());
        }

        let payload = json!({
            "inputs": {
                "source_sentence": query,
                "sentences": references,
            }
        });
        let scores: Vec<f32> = self
            .client
            .post_json(SIMILARITY_ORACLE, &self.url, &payload)
            .await?;

        if scores.len() != references.len() {
            return Err(OracleError::InvalidResponse {
                oracle: SIMILARITY_ORACLE,
                message: format!(
                    "{} scores for {} references",
                    scores.len(),
                    references.len()
                ),
            });
        }

        Ok(scores)
    }
}
