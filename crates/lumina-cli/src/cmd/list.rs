//! `lumina list` — the journal index, newest first.

use clap::Args;
use serde::Serialize;
use std::path::Path;

use crate::cmd::{open_comments, open_posts};
use crate::output::{OutputMode, pretty_rule, render};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show posts in this category (case-insensitive exact match).
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListRow {
    id: String,
    title: String,
    category: String,
    date: String,
    #[serde(rename = "readTime")]
    read_time: String,
    comments: usize,
}

pub fn run_list(args: &ListArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let posts = open_posts(data_dir);
    let comments = open_comments(data_dir);

    let rows: Vec<ListRow> = posts
        .list()
        .iter()
        .filter(|p| {
            args.category
                .as_ref()
                .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
        })
        .map(|p| ListRow {
            id: p.id.clone(),
            title: p.title.clone(),
            category: p.category.clone(),
            date: p.date.clone(),
            read_time: p.read_time.clone(),
            comments: comments.count_for_post(&p.id),
        })
        .collect();

    render(output, &rows, |rows, w| {
        if rows.is_empty() {
            writeln!(w, "(no posts)")?;
            return Ok(());
        }
        writeln!(w, "Journal ({} posts)", rows.len())?;
        pretty_rule(w)?;
        for row in rows {
            writeln!(
                w,
                "{:<16} {:<14} {:<13} {:>10}  {} ({} comments)",
                row.id, row.category, row.date, row.read_time, row.title, row.comments
            )?;
        }
        Ok(())
    })
}
