//! Subcommand handlers. Each module exposes an `Args` struct and a
//! `run_*` entry point taking the resolved output mode and data dir.

pub mod ask;
pub mod comment;
pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod show;
pub mod update;

use anyhow::Result;
use lumina_core::config::{LuminaConfig, load_config};
use lumina_core::store::{CommentStore, FileStore, PostStore};
use lumina_core::LuminaError;
use std::path::Path;

use crate::output::{OutputMode, fail};

pub(crate) fn open_posts(data_dir: &Path) -> PostStore<FileStore> {
    PostStore::open(FileStore::new(data_dir))
}

pub(crate) fn open_comments(data_dir: &Path) -> CommentStore<FileStore> {
    CommentStore::open(FileStore::new(data_dir))
}

/// Gate an editor operation behind the shared secret.
///
/// The credential comes from `--password` or the `LUMINA_PASSWORD` env
/// var; the secret it is compared against comes from the config (or its
/// `LUMINA_ADMIN_PASSWORD` override). Returns the loaded config so the
/// caller doesn't load it twice.
pub(crate) fn require_editor(
    password_flag: Option<&str>,
    data_dir: &Path,
    output: OutputMode,
) -> Result<LuminaConfig> {
    let config = load_config(data_dir)?;
    let supplied = password_flag
        .map(ToString::to_string)
        .or_else(|| std::env::var("LUMINA_PASSWORD").ok())
        .unwrap_or_default();

    if supplied != config.admin_password() {
        return Err(fail(output, &LuminaError::BadCredentials));
    }
    Ok(config)
}
