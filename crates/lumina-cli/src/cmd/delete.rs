//! `lumina delete` — remove a post (editor-gated).
//!
//! Comments on the deleted post are left in place; they simply stop
//! appearing once nothing references their post id.

use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::cmd::{open_posts, require_editor};
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the post to delete.
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Serialize)]
struct DeleteOutput {
    id: String,
    deleted: bool,
}

pub fn run_delete(
    args: &DeleteArgs,
    password_flag: Option<&str>,
    output: OutputMode,
    data_dir: &Path,
) -> anyhow::Result<()> {
    require_editor(password_flag, data_dir, output)?;

    let mut posts = open_posts(data_dir);
    let existed = posts.get(&args.id).is_some();

    if existed && !args.force {
        if io::stdin().is_terminal() {
            let title = posts
                .get(&args.id)
                .map_or_else(String::new, |p| p.title.clone());
            eprint!("delete \"{title}\"? [y/N] ");
            io::stderr().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            if !matches!(line.trim(), "y" | "Y" | "yes") {
                return render(output, &DeleteOutput { id: args.id.clone(), deleted: false }, |out, w| {
                    writeln!(w, "kept {}", out.id)
                });
            }
        } else {
            render_error(
                output,
                &CliError::with_details(
                    "refusing to delete without confirmation",
                    "Pass --force when stdin is not a terminal",
                    "needs_confirmation",
                ),
            )?;
            anyhow::bail!("refusing to delete without confirmation");
        }
    }

    // Idempotent: deleting an absent id is not an error.
    posts.delete(&args.id)?;

    render(
        output,
        &DeleteOutput {
            id: args.id.clone(),
            deleted: existed,
        },
        |out, w| {
            if out.deleted {
                writeln!(w, "✓ {}: deleted", out.id)
            } else {
                writeln!(w, "✓ {}: nothing to delete", out.id)
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{DeleteArgs, run_delete};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: DeleteArgs,
    }

    #[test]
    fn delete_args_parse() {
        let parsed = Wrapper::parse_from(["test", "3", "--force"]);
        assert_eq!(parsed.args.id, "3");
        assert!(parsed.args.force);
    }

    #[test]
    fn forced_delete_removes_post() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = DeleteArgs { id: "1".into(), force: true };
        run_delete(&args, Some("admin"), OutputMode::Json, dir.path()).expect("delete");
        let posts = crate::cmd::open_posts(dir.path());
        assert!(posts.get("1").is_none());
        assert_eq!(posts.list().len(), 3);
    }

    #[test]
    fn delete_absent_id_is_ok() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = DeleteArgs { id: "zzz".into(), force: true };
        run_delete(&args, Some("admin"), OutputMode::Json, dir.path()).expect("idempotent delete");
    }

    #[test]
    fn delete_requires_password() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = DeleteArgs { id: "1".into(), force: true };
        assert!(run_delete(&args, Some("wrong"), OutputMode::Json, dir.path()).is_err());
    }
}
