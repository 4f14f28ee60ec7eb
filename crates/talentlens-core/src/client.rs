//! Recommendation endpoint client.

use crate::model::{RecommendRequest, ResultItem};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Anything that can turn a role description into ranked assessments.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<ResultItem>>;
}

/// `POST <endpoint>` with a JSON body; expects a bare JSON array back.
#[derive(Debug, Clone)]
pub struct HttpRecommender {
    client: Client,
    endpoint: String,
}

impl HttpRecommender {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("talentlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Recommender for HttpRecommender {
    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<ResultItem>> {
        debug!(endpoint = %self.endpoint, use_ai = request.use_ai, "POST recommend");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("endpoint returned {status}")));
        }

        response
            .json::<Vec<ResultItem>>()
            .await
            .map_err(|e| Error::Network(format!("undecodable response: {e}")))
    }
}
