#![forbid(unsafe_code)]

mod assistant;
mod cmd;
mod image;
mod output;
mod tui;
mod validate;

use clap::{Parser, Subcommand};
use lumina_core::config::resolve_data_dir;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lumina: a device-local journal with comments, search, and a reading assistant",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json and TTY detection).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Editor password for gated commands (or set LUMINA_PASSWORD).
    #[arg(long, global = true)]
    password: Option<String>,

    /// Data directory (defaults to LUMINA_DIR, then the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }

    fn password_flag(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List posts",
        long_about = "List posts, newest first, with comment counts.",
        after_help = "EXAMPLES:\n    # List all posts\n    lumina list\n\n    # Only one category\n    lumina list --category Design\n\n    # Emit machine-readable output\n    lumina list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one post",
        long_about = "Show a post's metadata, rendered body, and comments.",
        after_help = "EXAMPLES:\n    # Show a post\n    lumina show 1\n\n    # Emit machine-readable output\n    lumina show 1 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Write",
        about = "Publish a new post",
        long_about = "Publish a new post. Requires the editor password.",
        after_help = "EXAMPLES:\n    # Publish from a file\n    lumina create --title \"Slow Mornings\" --excerpt \"On waking early\" \\\n        --content-file draft.md --category Lifestyle --password admin\n\n    # Embed a local cover image\n    lumina create --title \"Hello\" --excerpt \"hi\" --content \"body\" \\\n        --category Notes --image cover.jpg --password admin"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Edit an existing post",
        long_about = "Edit a post in place; unflagged fields keep their values. Saving restamps the date and read time. Requires the editor password.",
        after_help = "EXAMPLES:\n    # Retitle a post\n    lumina update 1 --title \"New title\" --password admin\n\n    # Replace the body from a file\n    lumina update 1 --content-file rewrite.md --password admin"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Delete a post",
        long_about = "Delete a post by id. Requires the editor password.",
        after_help = "EXAMPLES:\n    # Delete with confirmation prompt\n    lumina delete 1 --password admin\n\n    # Delete without prompting\n    lumina delete 1 --force --password admin"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Read",
        about = "Search posts",
        long_about = "Search titles, excerpts, and categories case-insensitively.",
        after_help = "EXAMPLES:\n    # Find posts about design\n    lumina search design\n\n    # Emit machine-readable output\n    lumina search design --json"
    )]
    Search(cmd::search::SearchArgs),

    #[command(
        next_help_heading = "Comments",
        about = "Add, list, or remove comments",
        after_help = "EXAMPLES:\n    # Leave a comment\n    lumina comment add 1 --author Sam --body \"Great read\"\n\n    # List a post's comments\n    lumina comment list 1\n\n    # Remove a comment (editor only)\n    lumina comment remove 1718000000000 --password admin"
    )]
    Comment(cmd::comment::CommentArgs),

    #[command(
        next_help_heading = "Assistant",
        about = "Ask the reading assistant about a post",
        long_about = "Send a question about a post to the reading assistant. Needs LUMINA_API_KEY (or GEMINI_API_KEY) to be configured.",
        after_help = "EXAMPLES:\n    # Discuss a post\n    lumina ask 1 \"What is the main argument here?\""
    )]
    Ask(cmd::ask::AskArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Open the full-screen reader",
        long_about = "Open the interactive terminal reader: browse, read, search, comment, chat with the assistant, and manage posts after logging in."
    )]
    Ui,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LUMINA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lumina=debug,info"
        } else {
            "lumina=info,warn"
        })
    });

    let format = env::var("LUMINA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &data_dir),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &data_dir),
        Commands::Create(ref args) => {
            cmd::create::run_create(args, cli.password_flag(), output, &data_dir)
        }
        Commands::Update(ref args) => {
            cmd::update::run_update(args, cli.password_flag(), output, &data_dir)
        }
        Commands::Delete(ref args) => {
            cmd::delete::run_delete(args, cli.password_flag(), output, &data_dir)
        }
        Commands::Search(ref args) => cmd::search::run_search(args, output, &data_dir),
        Commands::Comment(ref args) => {
            cmd::comment::run_comment(args, cli.password_flag(), output, &data_dir)
        }
        Commands::Ask(ref args) => cmd::ask::run_ask(args, output, &data_dir),
        Commands::Ui => tui::run(&data_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_with_global_json() {
        let cli = Cli::parse_from(["lumina", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn parse_create_with_password() {
        let cli = Cli::parse_from([
            "lumina", "create", "--title", "T", "--excerpt", "E", "--content", "C",
            "--category", "K", "--password", "admin",
        ]);
        assert_eq!(cli.password_flag(), Some("admin"));
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn parse_comment_subcommand() {
        let cli = Cli::parse_from([
            "lumina", "comment", "add", "1", "--author", "Sam", "--body", "hi",
        ]);
        assert!(matches!(cli.command, Commands::Comment(_)));
    }

    #[test]
    fn format_flag_beats_json_flag() {
        let cli = Cli::parse_from(["lumina", "--json", "--format", "text", "list"]);
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn data_dir_flag_parses() {
        let cli = Cli::parse_from(["lumina", "--data-dir", "/tmp/x", "list"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/x")));
    }
}
