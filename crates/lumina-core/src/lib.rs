#![forbid(unsafe_code)]
//! lumina-core: the device-local journal engine.
//!
//! Everything stateful lives here: the post and comment stores over a
//! string-keyed persistence adapter, the seed corpus, the line-oriented
//! document renderer, the session view-state machine, config, and the
//! error taxonomy. Front ends (CLI, TUI) stay thin over this crate.
//!
//! # Conventions
//!
//! - **Errors**: domain failures are [`error::LuminaError`]; outer layers
//!   use `anyhow::Result`.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod seed;
pub mod store;
pub mod view;

pub use error::LuminaError;
pub use model::{Comment, Post, PostDraft};
pub use render::{Block, render};
pub use store::{CommentStore, FileStore, KeyValue, MemoryStore, PostStore};
pub use view::{Session, View};
