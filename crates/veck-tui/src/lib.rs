//! Full-screen terminal UI for veck.
//!
//! Elm-style architecture: a pure reducer (`update`) turns `UiEvent`s into
//! state changes plus `UiEffect`s; the runtime owns the terminal, executes
//! effects by spawning tokio tasks, and delivers their results back as
//! events through an inbox channel.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::IsTerminal;

use anyhow::{Result, bail};
use veck_api::{ApiClient, Config};

/// Runs the TUI until the user quits.
///
/// Must be called with a tokio runtime entered; the event loop itself is
/// synchronous but effect handlers are spawned onto the runtime.
pub fn run(config: &Config) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("veck requires a terminal; use the subcommands for scripted access");
    }
    let client = ApiClient::new(config)?;
    let mut runtime = runtime::TuiRuntime::new(client)?;
    runtime.run()
}
