//! Typed HTTP client for the veck backend.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::types::{Message, SearchResult, Sender, Session};

const USER_AGENT: &str = concat!("veck/", env!("CARGO_PKG_VERSION"));

/// Payload for `POST /sessions/restore`.
///
/// Carries the session row and messages exactly as they were snapshotted
/// before deletion. `restore_vectors` is the negation of the `remove_vectors`
/// flag used for the delete: vectors are re-embedded only if they were
/// actually removed.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreRequest {
    pub session: Session,
    pub messages: Vec<Message>,
    pub restore_vectors: bool,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        debug!("GET /sessions");
        let resp = self
            .http
            .get(self.url("/sessions"))
            .send()
            .await
            .context("request to list sessions failed")?;
        let resp = check_status(resp).await?;
        resp.json().await.context("invalid session list response")
    }

    pub async fn create_session(&self, title: Option<&str>) -> Result<Session> {
        debug!(?title, "POST /sessions");
        let resp = self
            .http
            .post(self.url("/sessions"))
            .json(&json!({ "title": title }))
            .send()
            .await
            .context("request to create session failed")?;
        let resp = check_status(resp).await?;
        resp.json().await.context("invalid create session response")
    }

    pub async fn delete_session(&self, id: &str, remove_vectors: bool) -> Result<()> {
        debug!(id, remove_vectors, "DELETE /sessions/{{id}}");
        let resp = self
            .http
            .delete(self.url(&format!("/sessions/{id}")))
            .query(&[("remove_vectors", remove_vectors)])
            .send()
            .await
            .context("request to delete session failed")?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn restore_session(&self, request: &RestoreRequest) -> Result<()> {
        debug!(
            id = %request.session.id,
            messages = request.messages.len(),
            restore_vectors = request.restore_vectors,
            "POST /sessions/restore"
        );
        let resp = self
            .http
            .post(self.url("/sessions/restore"))
            .json(request)
            .send()
            .await
            .context("request to restore session failed")?;
        check_status(resp).await?;
        Ok(())
    }

    /// Messages come back ascending by timestamp; callers rely on that order.
    pub async fn list_messages(&self, id: &str, limit: usize, offset: usize) -> Result<Vec<Message>> {
        debug!(id, limit, offset, "GET /sessions/{{id}}/messages");
        let resp = self
            .http
            .get(self.url(&format!("/sessions/{id}/messages")))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .context("request to list messages failed")?;
        let resp = check_status(resp).await?;
        resp.json().await.context("invalid message list response")
    }

    pub async fn post_message(&self, id: &str, sender: Sender, text: &str) -> Result<Message> {
        debug!(id, sender = sender.as_str(), "POST /sessions/{{id}}/message");
        let resp = self
            .http
            .post(self.url(&format!("/sessions/{id}/message")))
            .json(&json!({ "sender": sender, "text": text }))
            .send()
            .await
            .context("request to post message failed")?;
        let resp = check_status(resp).await?;
        resp.json().await.context("invalid post message response")
    }

    /// Asks the LLM proxy for a reply. The model name comes from config.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "POST /chat");
        let resp = self
            .http
            .post(self.url("/chat"))
            .json(&json!({ "prompt": prompt, "model": self.model }))
            .send()
            .await
            .context("request to generate reply failed")?;
        let resp = check_status(resp).await?;
        let body: ChatResponse = resp.json().await.context("invalid chat response")?;
        Ok(body.response)
    }

    pub async fn search(&self, query: &str, score_threshold: f64) -> Result<Vec<SearchResult>> {
        debug!(score_threshold, "POST /query");
        let resp = self
            .http
            .post(self.url("/query"))
            .json(&json!({ "query": query, "score_threshold": score_threshold }))
            .send()
            .await
            .context("similarity query failed")?;
        let resp = check_status(resp).await?;
        let body: QueryResponse = resp.json().await.context("invalid query response")?;
        Ok(body.results)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// FastAPI-style error bodies carry a `detail` field; surface it when present.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(str::to_string)));
    match detail {
        Some(detail) => Err(anyhow!("backend returned {status}: {detail}")),
        None if body.is_empty() => Err(anyhow!("backend returned {status}")),
        None => Err(anyhow!("backend returned {status}: {body}")),
    }
}
