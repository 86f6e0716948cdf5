//! `lumina create` — publish a new post (editor-gated).

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

use lumina_core::PostDraft;

use crate::cmd::{open_posts, require_editor};
use crate::image::resolve_image_ref;
use crate::output::{CliError, OutputMode, render, render_error};
use crate::validate;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Post title.
    #[arg(long)]
    pub title: String,

    /// One-line summary shown on the index and in search results.
    #[arg(long)]
    pub excerpt: String,

    /// Body text, inline.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Body text, read from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Category label, e.g. "Design".
    #[arg(long)]
    pub category: String,

    /// Byline; defaults to "Admin".
    #[arg(long)]
    pub author: Option<String>,

    /// Cover image: a URL, a data URI, or a local file to embed.
    #[arg(long)]
    pub image: Option<String>,
}

pub fn run_create(
    args: &CreateArgs,
    password_flag: Option<&str>,
    output: OutputMode,
    data_dir: &Path,
) -> anyhow::Result<()> {
    require_editor(password_flag, data_dir, output)?;

    let content = match (&args.content, &args.content_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read content from {}", path.display()))?,
        (None, None) => String::new(),
    };

    for check in [
        validate::validate_title(&args.title),
        validate::validate_excerpt(&args.excerpt),
        validate::validate_content(&content),
        validate::validate_category(&args.category),
    ] {
        if let Err(e) = check {
            render_error(output, &e.to_cli_error())?;
            anyhow::bail!("{}", e.reason);
        }
    }

    let image_url = match &args.image {
        Some(arg) => Some(resolve_image_ref(arg).map_err(|e| {
            let msg = e.to_string();
            let _ = render_error(
                output,
                &CliError::with_details(&msg, "Use JPEG/PNG/GIF/WebP under 2 MiB, or a URL", "invalid_image"),
            );
            anyhow::anyhow!(msg)
        })?),
        None => None,
    };

    let mut posts = open_posts(data_dir);
    let created = posts.create(PostDraft {
        title: args.title.clone(),
        excerpt: args.excerpt.clone(),
        content,
        category: args.category.clone(),
        author: args.author.clone(),
        image_url,
    })?;

    render(output, &created, |post, w| {
        writeln!(w, "✓ {}: published \"{}\"", post.id, post.title)
    })
}

#[cfg(test)]
mod tests {
    use super::{CreateArgs, run_create};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CreateArgs,
    }

    fn args(title: &str, content: &str) -> CreateArgs {
        CreateArgs {
            title: title.to_string(),
            excerpt: "an excerpt".to_string(),
            content: Some(content.to_string()),
            content_file: None,
            category: "Testing".to_string(),
            author: None,
            image: None,
        }
    }

    #[test]
    fn create_args_parse() {
        let parsed = Wrapper::parse_from([
            "test",
            "--title",
            "Hello",
            "--excerpt",
            "hi",
            "--content",
            "body",
            "--category",
            "Notes",
        ]);
        assert_eq!(parsed.args.title, "Hello");
        assert_eq!(parsed.args.content.as_deref(), Some("body"));
    }

    #[test]
    fn create_succeeds_with_password_flag() {
        let dir = tempfile::tempdir().expect("temp dir");
        run_create(
            &args("Fresh", "hello world"),
            Some("admin"),
            OutputMode::Json,
            dir.path(),
        )
        .expect("create should succeed");
    }

    #[test]
    fn create_rejects_wrong_password() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = run_create(
            &args("Fresh", "hello world"),
            Some("guess"),
            OutputMode::Json,
            dir.path(),
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn create_rejects_empty_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = run_create(&args("Fresh", "  "), Some("admin"), OutputMode::Json, dir.path())
            .expect_err("must fail");
        assert!(err.to_string().contains("empty"));
    }
}
