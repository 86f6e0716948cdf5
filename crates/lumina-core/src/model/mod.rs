//! Record types shared across the stores and front ends.

pub mod comment;
pub mod post;

pub use comment::Comment;
pub use post::{Post, PostDraft};
