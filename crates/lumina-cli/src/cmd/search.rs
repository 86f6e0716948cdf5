//! `lumina search` — find posts by title, excerpt, or category.

use clap::Args;
use serde::Serialize;
use std::path::Path;

use crate::cmd::open_posts;
use crate::output::{OutputMode, pretty_rule, render};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms, matched case-insensitively as a single phrase.
    pub query: String,
}

#[derive(Serialize)]
struct Hit {
    id: String,
    title: String,
    category: String,
    excerpt: String,
}

pub fn run_search(args: &SearchArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let posts = open_posts(data_dir);
    let all = posts.list();
    let hits: Vec<Hit> = lumina_search::search(&args.query, all)
        .into_iter()
        .map(|p| Hit {
            id: p.id.clone(),
            title: p.title.clone(),
            category: p.category.clone(),
            excerpt: p.excerpt.clone(),
        })
        .collect();

    render(output, &hits, |hits, w| {
        if hits.is_empty() {
            writeln!(w, "no matches")?;
            return Ok(());
        }
        for hit in hits {
            writeln!(w, "{}  [{}] {}", hit.id, hit.category, hit.title)?;
            if output == OutputMode::Pretty {
                writeln!(w, "    {}", hit.excerpt)?;
            }
        }
        if output == OutputMode::Pretty {
            pretty_rule(w)?;
            writeln!(w, "{} match(es)", hits.len())?;
        }
        Ok(())
    })
}
