//! Search command handler.

use anyhow::{Context, Result, bail};
use veck_api::{ApiClient, Config};

pub async fn run(config: &Config, query: &str, threshold: f64) -> Result<()> {
    if query.trim().is_empty() {
        bail!("query must not be blank");
    }
    if !(0.0..=1.0).contains(&threshold) {
        bail!("threshold must be between 0.0 and 1.0");
    }

    let client = ApiClient::new(config)?;
    let results = client
        .search(query.trim(), threshold)
        .await
        .context("similarity search")?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for result in results {
        println!("score {:.2}", result.score);
        println!("  Q: {}", result.prompt);
        println!("  A: {}", result.response);
        println!();
    }
    Ok(())
}
