//! `lumina comment` — reader comments: add, list, remove.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

use crate::cmd::{open_comments, open_posts, require_editor};
use crate::output::{OutputMode, pretty_rule, render, render_error};
use crate::validate;

#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(subcommand)]
    pub command: CommentCommand,
}

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    /// Leave a comment on a post. No password needed.
    Add {
        /// Id of the post to comment on.
        post_id: String,
        /// Display name of the commenter.
        #[arg(long)]
        author: String,
        /// Comment text.
        #[arg(long)]
        body: String,
    },
    /// List the comments on a post, newest first.
    List {
        /// Id of the post.
        post_id: String,
    },
    /// Remove a comment by id (editor-gated).
    Remove {
        /// Id of the comment to remove.
        comment_id: String,
    },
}

#[derive(Serialize)]
struct CommentListOutput {
    #[serde(rename = "postId")]
    post_id: String,
    comments: Vec<lumina_core::Comment>,
}

pub fn run_comment(
    args: &CommentArgs,
    password_flag: Option<&str>,
    output: OutputMode,
    data_dir: &Path,
) -> anyhow::Result<()> {
    match &args.command {
        CommentCommand::Add {
            post_id,
            author,
            body,
        } => {
            for check in [
                validate::validate_comment_author(author),
                validate::validate_comment_body(body),
            ] {
                if let Err(e) = check {
                    render_error(output, &e.to_cli_error())?;
                    anyhow::bail!("{}", e.reason);
                }
            }

            // Commenting on an unknown post is allowed; the comment just
            // never surfaces until a post with that id exists.
            let posts = open_posts(data_dir);
            if posts.get(post_id).is_none() {
                warn!(post_id = %post_id, "comment targets an unknown post");
            }

            let mut comments = open_comments(data_dir);
            let created = comments.add(post_id, author, body)?;
            render(output, &created, |c, w| {
                writeln!(w, "✓ {}: comment added by {}", c.id, c.author)
            })
        }
        CommentCommand::List { post_id } => {
            let comments = open_comments(data_dir);
            let listed = CommentListOutput {
                post_id: post_id.clone(),
                comments: comments.for_post(post_id),
            };
            render(output, &listed, |out, w| {
                if out.comments.is_empty() {
                    writeln!(w, "no comments on {}", out.post_id)?;
                    return Ok(());
                }
                for c in &out.comments {
                    writeln!(w, "{}  {} ({})", c.id, c.author, c.date)?;
                    writeln!(w, "    {}", c.content)?;
                }
                if output == OutputMode::Pretty {
                    pretty_rule(w)?;
                    writeln!(w, "{} comment(s)", out.comments.len())?;
                }
                Ok(())
            })
        }
        CommentCommand::Remove { comment_id } => {
            require_editor(password_flag, data_dir, output)?;
            let mut comments = open_comments(data_dir);
            comments.remove(comment_id)?;
            render(output, &serde_json::json!({ "id": comment_id, "removed": true }), |_, w| {
                writeln!(w, "✓ {comment_id}: removed")
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentArgs, CommentCommand, run_comment};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CommentArgs,
    }

    #[test]
    fn add_args_parse() {
        let parsed = Wrapper::parse_from([
            "test", "add", "1", "--author", "Sam", "--body", "Nice post",
        ]);
        match parsed.args.command {
            CommentCommand::Add { post_id, author, body } => {
                assert_eq!(post_id, "1");
                assert_eq!(author, "Sam");
                assert_eq!(body, "Nice post");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn add_then_list_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let add = CommentArgs {
            command: CommentCommand::Add {
                post_id: "1".into(),
                author: "Sam".into(),
                body: "Great read".into(),
            },
        };
        run_comment(&add, None, OutputMode::Json, dir.path()).expect("add");

        let comments = crate::cmd::open_comments(dir.path());
        let listed = comments.for_post("1");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].author, "Sam");
    }

    #[test]
    fn add_rejects_blank_author() {
        let dir = tempfile::tempdir().expect("temp dir");
        let add = CommentArgs {
            command: CommentCommand::Add {
                post_id: "1".into(),
                author: "  ".into(),
                body: "hello".into(),
            },
        };
        assert!(run_comment(&add, None, OutputMode::Json, dir.path()).is_err());
    }

    #[test]
    fn remove_requires_password() {
        let dir = tempfile::tempdir().expect("temp dir");
        let remove = CommentArgs {
            command: CommentCommand::Remove {
                comment_id: "123".into(),
            },
        };
        assert!(run_comment(&remove, Some("wrong"), OutputMode::Json, dir.path()).is_err());
    }

    #[test]
    fn remove_absent_comment_is_ok() {
        let dir = tempfile::tempdir().expect("temp dir");
        let remove = CommentArgs {
            command: CommentCommand::Remove {
                comment_id: "123".into(),
            },
        };
        run_comment(&remove, Some("admin"), OutputMode::Json, dir.path()).expect("idempotent");
    }
}
