#![forbid(unsafe_code)]
//! Stateless substring search over a post snapshot.
//!
//! Case-insensitive containment against title, excerpt, and category
//! (logical OR). Results keep the corpus's current order; nothing is
//! re-ranked. An empty or whitespace-only query returns nothing at all —
//! "no query" means "no results panel", not "match everything".

use lumina_core::Post;
use tracing::debug;

/// Filter `posts` down to those matching `query`.
#[must_use]
pub fn search<'a>(query: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let hits: Vec<&Post> = posts.iter().filter(|p| matches(p, &needle)).collect();
    debug!(query = %needle, hits = hits.len(), corpus = posts.len(), "search complete");
    hits
}

/// `needle` must already be trimmed and lowercased.
fn matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.category.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::search;
    use lumina_core::Post;
    use lumina_core::seed::seed_posts;

    fn post(id: &str, title: &str, excerpt: &str, category: &str) -> Post {
        Post {
            id: id.into(),
            title: title.into(),
            excerpt: excerpt.into(),
            content: "body".into(),
            author: "a".into(),
            date: "Oct 12, 2023".into(),
            read_time: "1 min read".into(),
            category: category.into(),
            image_url: String::new(),
        }
    }

    #[test]
    fn empty_and_whitespace_queries_match_nothing() {
        let corpus = seed_posts();
        assert!(search("", &corpus).is_empty());
        assert!(search("   ", &corpus).is_empty());
        assert!(search("\t\n", &corpus).is_empty());
    }

    #[test]
    fn matches_are_case_insensitive_across_all_three_fields() {
        let corpus = vec![
            post("1", "Minimal DESIGN thinking", "x", "Culture"),
            post("2", "Elsewhere", "a designer's notebook", "Culture"),
            post("3", "Elsewhere", "x", "Design"),
            post("4", "Nothing here", "x", "Culture"),
        ];

        let hits = search("design", &corpus);
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn result_order_preserves_corpus_order() {
        let corpus = vec![
            post("z", "query last", "x", "x"),
            post("a", "query first", "x", "x"),
        ];
        let hits = search("query", &corpus);
        assert_eq!(hits[0].id, "z");
        assert_eq!(hits[1].id, "a");
    }

    #[test]
    fn body_content_is_not_searched() {
        let mut p = post("1", "title", "excerpt", "category");
        p.content = "needle".into();
        assert!(search("needle", &[p]).is_empty());
    }

    #[test]
    fn seed_corpus_smoke() {
        let corpus = seed_posts();
        let hits = search("design", &corpus);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        assert!(search("zzz-no-such-term", &corpus).is_empty());
    }
}
