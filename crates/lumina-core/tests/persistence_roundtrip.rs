//! Disk-backed round-trip coverage: what one session persists, the next
//! session hydrates field-for-field and in order.

use lumina_core::model::PostDraft;
use lumina_core::store::{CommentStore, FileStore, PostStore};

fn draft(title: &str, content: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        excerpt: format!("{title} excerpt"),
        content: content.to_string(),
        category: "Testing".to_string(),
        author: Some("Quinn".to_string()),
        image_url: None,
    }
}

#[test]
fn posts_survive_a_process_restart() {
    let dir = tempfile::tempdir().expect("temp dir");

    let created = {
        let mut store = PostStore::open(FileStore::new(dir.path()));
        store
            .create(draft("Written in session one", "body\n\nmore body"))
            .expect("create")
    };

    let reopened = PostStore::open(FileStore::new(dir.path()));
    assert_eq!(reopened.list().len(), 5);
    assert_eq!(reopened.list()[0], created);
    // Seed posts keep their relative order behind the new one.
    assert_eq!(reopened.list()[1].id, "1");
    assert_eq!(reopened.list()[4].id, "4");
}

#[test]
fn mutations_are_visible_before_the_call_returns() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut store = PostStore::open(FileStore::new(dir.path()));
    store.delete("2").expect("delete");

    // A second store over the same directory, opened immediately after the
    // mutation returned, must already see it.
    let observer = PostStore::open(FileStore::new(dir.path()));
    assert!(observer.get("2").is_none());
    assert_eq!(observer.list().len(), 3);
}

#[test]
fn comments_roundtrip_and_outlive_their_post() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let mut comments = CommentStore::open(FileStore::new(dir.path()));
        comments.add("3", "Dana", "Lovely photos").expect("add");
        comments.add("3", "Eli", "Adding Tokyo to my list").expect("add");

        let mut posts = PostStore::open(FileStore::new(dir.path()));
        posts.delete("3").expect("delete parent post");
    }

    let comments = CommentStore::open(FileStore::new(dir.path()));
    let timeline = comments.for_post("3");
    assert_eq!(timeline.len(), 2, "no cascade delete");
    // Same-day adds come back newest id (creation order) first.
    assert_eq!(timeline[0].author, "Eli");
    assert_eq!(timeline[1].author, "Dana");
}

#[test]
fn post_and_comment_keys_are_independent() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut comments = CommentStore::open(FileStore::new(dir.path()));
    comments.add("1", "Dana", "First!").expect("add");

    // Corrupt the post collection only; comments must hydrate unaffected
    // while posts fall back to the seed corpus.
    std::fs::write(dir.path().join("lumina_posts.json"), "{garbage").expect("corrupt posts");

    let posts = PostStore::open(FileStore::new(dir.path()));
    assert_eq!(posts.list().len(), 4);

    let comments = CommentStore::open(FileStore::new(dir.path()));
    assert_eq!(comments.count_for_post("1"), 1);
}
