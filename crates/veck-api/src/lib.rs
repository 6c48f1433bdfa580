//! HTTP client and shared types for the veck backend.
//!
//! The backend owns the session database, the LLM proxy, and the vector
//! store; this crate only speaks its HTTP contract. All state lives on the
//! server or in the UI crate — nothing here is persisted locally except the
//! config file and the log file.

pub mod client;
pub mod config;
pub mod logging;
pub mod types;

pub use client::{ApiClient, RestoreRequest};
pub use config::Config;
pub use types::{Message, SearchResult, Sender, Session};
