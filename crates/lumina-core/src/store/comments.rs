//! Append-only comment collection, keyed globally and filtered per post.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{LuminaError, Result};
use crate::model::Comment;
use crate::model::post::display_date;
use crate::store::kv::KeyValue;

/// Storage key for the serialized comment collection.
pub const COMMENTS_KEY: &str = "lumina_comments";

pub struct CommentStore<S> {
    kv: S,
    comments: Vec<Comment>,
}

impl<S: KeyValue> CommentStore<S> {
    /// Hydrate from storage; absent or corrupt data becomes the empty
    /// collection rather than a session failure.
    pub fn open(kv: S) -> Self {
        let comments = match kv.get(COMMENTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Comment>>(&raw).unwrap_or_else(|e| {
                warn!("stored comments unreadable, starting empty: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("comment storage unreadable, starting empty: {e}");
                Vec::new()
            }
        };
        debug!(count = comments.len(), "comment store hydrated");
        Self { kv, comments }
    }

    /// All comments on one post, newest first. Display dates only carry day
    /// precision, so same-day ties fall back to creation order via the id.
    #[must_use]
    pub fn for_post(&self, post_id: &str) -> Vec<Comment> {
        let mut matching: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        matching
    }

    #[must_use]
    pub fn count_for_post(&self, post_id: &str) -> usize {
        self.comments.iter().filter(|c| c.post_id == post_id).count()
    }

    /// Append a visitor comment. Author/content emptiness is the caller's
    /// validation concern; the store stamps id and date and persists.
    pub fn add(&mut self, post_id: &str, author: &str, content: &str) -> Result<Comment> {
        let comment = Comment {
            id: self.fresh_id(),
            post_id: post_id.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            date: display_date(Utc::now().date_naive()),
            avatar: None,
        };
        self.comments.push(comment.clone());
        self.persist()?;
        Ok(comment)
    }

    /// Remove a comment by id; removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        if self.comments.len() == before {
            return Ok(());
        }
        self.persist()
    }

    fn fresh_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.comments.iter().any(|c| c.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.comments).map_err(|e| LuminaError::Storage {
            key: COMMENTS_KEY.to_string(),
            source: std::io::Error::other(e),
        })?;
        self.kv.set(COMMENTS_KEY, &raw)
    }
}
