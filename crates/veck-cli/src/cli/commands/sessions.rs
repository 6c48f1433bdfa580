//! Session command handlers.

use anyhow::{Context, Result};
use veck_api::types::format_timestamp;
use veck_api::{ApiClient, Config};

pub async fn list(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let sessions = client.list_sessions().await.context("list sessions")?;
    if sessions.is_empty() {
        println!("No sessions.");
        return Ok(());
    }
    for session in sessions {
        let created = session
            .created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default();
        println!("{}  {:<30}  {}", session.id, session.display_title(), created);
    }
    Ok(())
}

pub async fn new(config: &Config, title: Option<&str>) -> Result<()> {
    let client = ApiClient::new(config)?;
    let session = client.create_session(title).await.context("create session")?;
    println!("Created session {} ({})", session.id, session.display_title());
    Ok(())
}

pub async fn delete(config: &Config, id: &str, remove_vectors: bool) -> Result<()> {
    let client = ApiClient::new(config)?;
    client
        .delete_session(id, remove_vectors)
        .await
        .with_context(|| format!("delete session {id}"))?;
    println!("Deleted session {id}");
    Ok(())
}
