//! `lumina ask` — discuss a post with the reading assistant.

use clap::Args;
use serde::Serialize;
use std::path::Path;

use lumina_core::LuminaError;
use lumina_core::config::load_config;

use crate::assistant;
use crate::cmd::open_posts;
use crate::output::{OutputMode, fail, render};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Id of the post to discuss.
    pub post_id: String,

    /// Question for the assistant.
    pub prompt: String,
}

#[derive(Serialize)]
struct AskOutput {
    #[serde(rename = "postId")]
    post_id: String,
    prompt: String,
    reply: String,
}

pub fn run_ask(args: &AskArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let posts = open_posts(data_dir);
    let Some(post) = posts.get(&args.post_id) else {
        return Err(fail(
            output,
            &LuminaError::PostNotFound {
                id: args.post_id.clone(),
            },
        ));
    };

    let config = load_config(data_dir)?;
    let context = format!("Title: {}\n\n{}", post.title, post.content);
    // The assistant never errors; misconfiguration and transport failures
    // come back as ordinary replies.
    let reply = assistant::ask(&config, &args.prompt, &context);

    render(
        output,
        &AskOutput {
            post_id: args.post_id.clone(),
            prompt: args.prompt.clone(),
            reply,
        },
        |out, w| writeln!(w, "{}", out.reply),
    )
}

#[cfg(test)]
mod tests {
    use super::{AskArgs, run_ask};
    use crate::output::OutputMode;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: AskArgs,
    }

    #[test]
    fn ask_args_parse() {
        let parsed = Wrapper::parse_from(["test", "1", "what is this about?"]);
        assert_eq!(parsed.args.post_id, "1");
        assert_eq!(parsed.args.prompt, "what is this about?");
    }

    #[test]
    fn ask_unknown_post_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = AskArgs {
            post_id: "missing".into(),
            prompt: "hi".into(),
        };
        let err = run_ask(&args, OutputMode::Json, dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("missing"));
    }
}
