use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reading speed used for the "<n> min read" estimate.
const WORDS_PER_MINUTE: usize = 200;

/// A publishable unit of content with metadata and raw body text.
///
/// Field names serialize in camelCase so stored collections stay readable
/// as plain JSON and compatible with earlier exports of the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Raw body text; rendered by the line classifier, never interpreted here.
    pub content: String,
    pub author: String,
    /// Display date, e.g. `Oct 12, 2023`.
    pub date: String,
    /// Display estimate, e.g. `4 min read`.
    pub read_time: String,
    pub category: String,
    pub image_url: String,
}

/// Editor input for a new post. The store assigns `id`, `date`, and
/// `read_time`; `author` and `image_url` fall back to defaults when empty.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
}

/// Estimate reading time from a raw word count: at least one minute,
/// rounded up at 200 words per minute.
#[must_use]
pub fn read_time_label(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// Format a date the way post and comment records display it.
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Parse a display date back into a calendar day. Returns `None` for
/// anything that doesn't match the display format.
#[must_use]
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%b %d, %Y").ok()
}
