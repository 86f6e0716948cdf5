//! In-memory post collection with write-through persistence.
//!
//! The collection hydrates once at open, falls back to the seed corpus when
//! the stored value is absent or unreadable, and re-serializes the whole
//! collection on every mutation.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{LuminaError, Result};
use crate::model::post::{display_date, read_time_label};
use crate::model::{Post, PostDraft};
use crate::seed::seed_posts;
use crate::store::kv::KeyValue;

/// Storage key for the serialized post collection.
pub const POSTS_KEY: &str = "lumina_posts";

pub struct PostStore<S> {
    kv: S,
    posts: Vec<Post>,
}

impl<S: KeyValue> PostStore<S> {
    /// Hydrate the collection from storage. Absent or corrupt data falls
    /// back to the seed corpus; this never fails the session.
    pub fn open(kv: S) -> Self {
        let posts = match kv.get(POSTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => posts,
                Err(e) => {
                    warn!("stored posts unreadable, falling back to seed corpus: {e}");
                    seed_posts()
                }
            },
            Ok(None) => seed_posts(),
            Err(e) => {
                warn!("post storage unreadable, falling back to seed corpus: {e}");
                seed_posts()
            }
        };
        debug!(count = posts.len(), "post store hydrated");
        Self { kv, posts }
    }

    /// Current snapshot, insertion order with newest-created first.
    #[must_use]
    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Create a post from an editor draft: assign a fresh id, stamp today's
    /// date and the read-time estimate, prepend, and persist.
    pub fn create(&mut self, draft: PostDraft) -> Result<Post> {
        let today = Utc::now().date_naive();
        let post = Post {
            id: self.fresh_id(),
            read_time: read_time_label(&draft.content),
            date: display_date(today),
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            author: draft.author.unwrap_or_else(|| "Admin".to_string()),
            image_url: draft
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(placeholder_image),
        };

        self.posts.insert(0, post.clone());
        self.persist()?;
        Ok(post)
    }

    /// Replace an existing record in place. The position in the collection
    /// does not change.
    pub fn update(&mut self, post: Post) -> Result<()> {
        let Some(slot) = self.posts.iter_mut().find(|p| p.id == post.id) else {
            return Err(LuminaError::PostNotFound { id: post.id });
        };
        *slot = post;
        self.persist()
    }

    /// Remove a post by id. Deleting an absent id is a no-op; comments on
    /// the post are left in place.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Millisecond timestamp id, bumped until it collides with nothing in
    /// the current collection.
    fn fresh_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.posts.iter().any(|p| p.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.posts).map_err(|e| LuminaError::Storage {
            key: POSTS_KEY.to_string(),
            source: std::io::Error::other(e),
        })?;
        self.kv.set(POSTS_KEY, &raw)
    }
}

/// Random-looking placeholder cover, keyed by creation time like the ids.
fn placeholder_image() -> String {
    format!(
        "https://picsum.photos/800/600?random={}",
        Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::{POSTS_KEY, PostStore};
    use crate::model::{Post, PostDraft};
    use crate::seed::seed_posts;
    use crate::store::kv::{KeyValue, MemoryStore};

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            excerpt: "an excerpt".to_string(),
            content: "hello world".to_string(),
            category: "Testing".to_string(),
            author: None,
            image_url: None,
        }
    }

    #[test]
    fn open_without_stored_data_uses_seed() {
        let store = PostStore::open(MemoryStore::new());
        assert_eq!(store.list(), seed_posts().as_slice());
    }

    #[test]
    fn open_with_corrupt_data_uses_seed() {
        let kv = MemoryStore::new().with_entry(POSTS_KEY, "{not json!");
        let store = PostStore::open(kv);
        assert_eq!(store.list().len(), 4);
    }

    #[test]
    fn create_prepends_and_persists() {
        let mut store = PostStore::open(MemoryStore::new());
        let created = store.create(draft("Fresh")).expect("create");

        assert_eq!(store.list()[0], created);
        assert_eq!(store.list().len(), 5);
        assert_eq!(created.read_time, "1 min read");
        assert_eq!(created.author, "Admin");
        assert!(created.image_url.starts_with("https://picsum.photos/"));

        // Write-through: a second store over the same backend sees the post.
        let raw = store.kv.get(POSTS_KEY).expect("read").expect("written");
        let persisted: Vec<Post> = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(persisted[0].id, created.id);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = PostStore::open(MemoryStore::new());
        let a = store.create(draft("A")).expect("create a");
        let b = store.create(draft("B")).expect("create b");
        assert_ne!(a.id, b.id);
        assert!(store.list().iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn create_keeps_supplied_image() {
        let mut store = PostStore::open(MemoryStore::new());
        let mut d = draft("With image");
        d.image_url = Some("https://example.com/cover.png".to_string());
        let created = store.create(d).expect("create");
        assert_eq!(created.image_url, "https://example.com/cover.png");
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = PostStore::open(MemoryStore::new());
        let mut post = store.get("2").expect("seed post").clone();
        post.title = "Rewritten".to_string();

        store.update(post).expect("update");
        assert_eq!(store.list()[1].title, "Rewritten");
        assert_eq!(store.list()[1].id, "2");
    }

    #[test]
    fn update_missing_id_is_not_found_and_leaves_collection_alone() {
        let mut store = PostStore::open(MemoryStore::new());
        let before: Vec<Post> = store.list().to_vec();

        let mut ghost = before[0].clone();
        ghost.id = "no-such-id".to_string();
        let err = store.update(ghost).expect_err("must fail");
        assert_eq!(err.error_code(), "E201");
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = PostStore::open(MemoryStore::new());
        store.delete("3").expect("delete");
        assert!(store.get("3").is_none());
        assert_eq!(store.list().len(), 3);

        store.delete("3").expect("second delete is a no-op");
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn roundtrip_preserves_every_field_and_order() {
        let mut backend = MemoryStore::new();
        {
            let mut store = PostStore::open(MemoryStore::new());
            store.create(draft("Round trip")).expect("create");
            let raw = store.kv.get(POSTS_KEY).expect("read").expect("written");
            backend.set(POSTS_KEY, &raw).expect("copy");
        }

        let first = PostStore::open(backend);
        let raw = serde_json::to_string(first.list()).expect("serialize");
        let rehydrated =
            PostStore::open(MemoryStore::new().with_entry(POSTS_KEY, &raw));
        assert_eq!(first.list(), rehydrated.list());
    }
}
