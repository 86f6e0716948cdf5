//! `lumina show` — one post in full: metadata, rendered body, comments.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use lumina_core::render::{Block, render as render_blocks};
use lumina_core::{Comment, LuminaError, Post};

use crate::cmd::{open_comments, open_posts};
use crate::output::{OutputMode, fail, pretty_kv, pretty_rule, render};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Post ID.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    #[serde(flatten)]
    post: Post,
    comments: Vec<Comment>,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let posts = open_posts(data_dir);
    let Some(post) = posts.get(&args.id) else {
        return Err(fail(
            output,
            &LuminaError::PostNotFound {
                id: args.id.clone(),
            },
        ));
    };

    let comments = open_comments(data_dir).for_post(&post.id);
    let result = ShowOutput {
        post: post.clone(),
        comments,
    };

    render(output, &result, |r, w| {
        writeln!(w, "{}", r.post.title)?;
        pretty_rule(w)?;
        pretty_kv(w, "id", &r.post.id)?;
        pretty_kv(w, "author", &r.post.author)?;
        pretty_kv(w, "category", &r.post.category)?;
        pretty_kv(w, "date", &r.post.date)?;
        pretty_kv(w, "read time", &r.post.read_time)?;
        pretty_kv(w, "image", &r.post.image_url)?;
        writeln!(w)?;
        write_body(w, &r.post.content)?;
        writeln!(w)?;
        writeln!(w, "Comments ({})", r.comments.len())?;
        pretty_rule(w)?;
        for comment in &r.comments {
            writeln!(w, "- [{}] {}: {}", comment.date, comment.author, comment.content)?;
        }
        Ok(())
    })
}

/// Write the classified body blocks as plain terminal text.
fn write_body(w: &mut dyn Write, content: &str) -> std::io::Result<()> {
    for block in render_blocks(content) {
        match block {
            Block::Heading { level, text } => {
                writeln!(w, "{} {text}", "#".repeat(usize::from(level)))?;
            }
            Block::Quote(text) => writeln!(w, "  > {text}")?,
            Block::CodePlaceholder => writeln!(w, "  [code block]")?,
            Block::LineBreak => writeln!(w)?,
            Block::Paragraph(text) => writeln!(w, "{text}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ShowArgs, run_show, write_body};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ShowArgs,
    }

    #[test]
    fn show_args_parse() {
        let parsed = Wrapper::parse_from(["test", "42"]);
        assert_eq!(parsed.args.id, "42");
    }

    #[test]
    fn run_show_seed_post_succeeds() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = ShowArgs { id: "1".to_string() };
        run_show(&args, OutputMode::Json, dir.path()).expect("show should succeed");
    }

    #[test]
    fn run_show_missing_post_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = ShowArgs {
            id: "missing".to_string(),
        };
        let err = run_show(&args, OutputMode::Json, dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn body_blocks_render_as_text() {
        let mut buf = Vec::new();
        write_body(&mut buf, "# Title\n\n> wisdom\n```\nx\n```").expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("# Title"));
        assert!(text.contains("  > wisdom"));
        assert_eq!(text.matches("[code block]").count(), 2);
    }
}
