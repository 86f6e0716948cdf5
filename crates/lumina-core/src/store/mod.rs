//! Persistence adapter and the stores layered on top of it.

pub mod comments;
pub mod kv;
pub mod posts;

pub use comments::{COMMENTS_KEY, CommentStore};
pub use kv::{FileStore, KeyValue, MemoryStore};
pub use posts::{POSTS_KEY, PostStore};
