//! Config command handlers.

use anyhow::{Context, Result};
use veck_api::{Config, config};

pub fn path() {
    println!("{}", config::config_path().display());
}

pub fn init() -> Result<()> {
    let path = config::config_path();
    Config::init(&path).context("init config")?;
    println!("Created config at {}", path.display());
    Ok(())
}
