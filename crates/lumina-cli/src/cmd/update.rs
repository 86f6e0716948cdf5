//! `lumina update` — edit an existing post (editor-gated).
//!
//! Any field left unflagged keeps its stored value. Saving restamps the
//! publication date and recomputes the read time from the new body.

use anyhow::Context;
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};

use lumina_core::model::post::{display_date, read_time_label};

use crate::cmd::{open_posts, require_editor};
use crate::image::resolve_image_ref;
use crate::output::{CliError, OutputMode, render, render_error};
use crate::validate;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the post to edit.
    pub id: String,

    /// New title.
    #[arg(long)]
    pub title: Option<String>,

    /// New excerpt.
    #[arg(long)]
    pub excerpt: Option<String>,

    /// New body text, inline.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// New body text, read from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// New category label.
    #[arg(long)]
    pub category: Option<String>,

    /// New byline.
    #[arg(long)]
    pub author: Option<String>,

    /// New cover image: a URL, a data URI, or a local file to embed.
    #[arg(long)]
    pub image: Option<String>,
}

pub fn run_update(
    args: &UpdateArgs,
    password_flag: Option<&str>,
    output: OutputMode,
    data_dir: &Path,
) -> anyhow::Result<()> {
    require_editor(password_flag, data_dir, output)?;

    let mut posts = open_posts(data_dir);
    let mut post = match posts.get(&args.id) {
        Some(p) => p.clone(),
        None => {
            return Err(crate::output::fail(
                output,
                &lumina_core::LuminaError::PostNotFound {
                    id: args.id.clone(),
                },
            ));
        }
    };

    if let Some(title) = &args.title {
        post.title = title.clone();
    }
    if let Some(excerpt) = &args.excerpt {
        post.excerpt = excerpt.clone();
    }
    if let Some(content) = &args.content {
        post.content = content.clone();
    } else if let Some(path) = &args.content_file {
        post.content = std::fs::read_to_string(path)
            .with_context(|| format!("read content from {}", path.display()))?;
    }
    if let Some(category) = &args.category {
        post.category = category.clone();
    }
    if let Some(author) = &args.author {
        post.author = author.clone();
    }

    for check in [
        validate::validate_title(&post.title),
        validate::validate_excerpt(&post.excerpt),
        validate::validate_content(&post.content),
        validate::validate_category(&post.category),
    ] {
        if let Err(e) = check {
            render_error(output, &e.to_cli_error())?;
            anyhow::bail!("{}", e.reason);
        }
    }

    if let Some(arg) = &args.image {
        post.image_url = resolve_image_ref(arg).map_err(|e| {
            let msg = e.to_string();
            let _ = render_error(
                output,
                &CliError::with_details(&msg, "Use JPEG/PNG/GIF/WebP under 2 MiB, or a URL", "invalid_image"),
            );
            anyhow::anyhow!(msg)
        })?;
    }

    // Saving an edit restamps the post and re-derives the read time.
    post.date = display_date(Local::now().date_naive());
    post.read_time = read_time_label(&post.content);

    posts.update(post.clone())?;

    render(output, &post, |post, w| {
        writeln!(w, "✓ {}: updated \"{}\"", post.id, post.title)
    })
}

#[cfg(test)]
mod tests {
    use super::{UpdateArgs, run_update};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: UpdateArgs,
    }

    fn bare(id: &str) -> UpdateArgs {
        UpdateArgs {
            id: id.to_string(),
            title: None,
            excerpt: None,
            content: None,
            content_file: None,
            category: None,
            author: None,
            image: None,
        }
    }

    #[test]
    fn update_args_parse() {
        let parsed = Wrapper::parse_from(["test", "7", "--title", "New"]);
        assert_eq!(parsed.args.id, "7");
        assert_eq!(parsed.args.title.as_deref(), Some("New"));
    }

    #[test]
    fn update_restamps_read_time() {
        let dir = tempfile::tempdir().expect("temp dir");
        let long_body = "word ".repeat(450);
        let mut args = bare("1");
        args.content = Some(long_body);
        run_update(&args, Some("admin"), OutputMode::Json, dir.path()).expect("update");

        let posts = crate::cmd::open_posts(dir.path());
        let post = posts.get("1").expect("seeded post");
        assert_eq!(post.read_time, "3 min read");
    }

    #[test]
    fn update_unknown_id_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = run_update(&bare("nope"), Some("admin"), OutputMode::Json, dir.path())
            .expect_err("must fail");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn update_requires_password() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(run_update(&bare("1"), None, OutputMode::Json, dir.path()).is_err());
    }
}
