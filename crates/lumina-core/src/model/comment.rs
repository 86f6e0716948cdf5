use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::post::parse_display_date;

/// A reader-submitted note attached to one post by reference.
///
/// `post_id` is a soft reference: deleting a post leaves its comments in
/// place. Comments are append-only and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub content: String,
    /// Display date, same format as posts.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Comment {
    /// Sort key for newest-first timelines.
    ///
    /// Display dates only carry day precision, so same-day comments tie on
    /// the date; ids are creation timestamps and break the tie
    /// deterministically. Unparsable dates sort last.
    #[must_use]
    pub fn sort_key(&self) -> (NaiveDate, i64) {
        let day = parse_display_date(&self.date).unwrap_or(NaiveDate::MIN);
        let seq = self.id.parse::<i64>().unwrap_or(0);
        (day, seq)
    }
}
