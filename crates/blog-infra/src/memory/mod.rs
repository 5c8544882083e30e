//! In-memory storage - used when no database is configured and in tests.
//!
//! All repositories handed out by one [`InMemoryStore`] share a single state
//! behind an async `RwLock`, so relations and cascades behave like the
//! database schema: posts reference existing categories and users, deleting a
//! category or user deletes its posts, deleting a post or tag removes its links.
//! Data is lost on process restart.

mod post_repo;
mod taxonomy_repo;
mod user_repo;

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Category, Post, Tag, User};

pub use post_repo::InMemoryPostRepository;
pub use taxonomy_repo::{InMemoryCategoryRepository, InMemoryTagRepository};
pub use user_repo::InMemoryUserRepository;

/// Rows of every table, kept in insertion order.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub posts: Vec<Post>,
    /// `(post_id, tag_id)` pairs.
    pub post_tags: Vec<(Uuid, Uuid)>,
}

impl MemoryState {
    /// Remove posts matching `doomed` together with their tag links.
    pub(crate) fn delete_posts_where(&mut self, doomed: impl Fn(&Post) -> bool) -> usize {
        let removed: Vec<Uuid> = self
            .posts
            .iter()
            .filter(|post| doomed(post))
            .map(|post| post.id)
            .collect();

        self.posts.retain(|post| !removed.contains(&post.id));
        self.post_tags
            .retain(|(post_id, _)| !removed.contains(post_id));
        removed.len()
    }
}

/// Replace the row with the same id, or append a new one.
pub(crate) fn upsert<T: Clone>(rows: &mut Vec<T>, entity: &T, id_of: impl Fn(&T) -> Uuid) {
    let id = id_of(entity);
    match rows.iter_mut().find(|row| id_of(row) == id) {
        Some(row) => *row = entity.clone(),
        None => rows.push(entity.clone()),
    }
}

/// Shared in-memory store handing out repositories over the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.state.clone())
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository::new(self.state.clone())
    }

    pub fn tags(&self) -> InMemoryTagRepository {
        InMemoryTagRepository::new(self.state.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use blog_core::ports::{BaseRepository, PostRepository};

    use super::*;

    struct Seeded {
        store: InMemoryStore,
        category: Category,
        author: User,
        tag: Tag,
        post: Post,
    }

    async fn seeded() -> Seeded {
        let store = InMemoryStore::new();
        let category = store.categories().save(Category::new("Rust")).await.unwrap();
        let author = store
            .users()
            .save(User::new("alice", "alice@example.com"))
            .await
            .unwrap();
        let tag = store.tags().save(Tag::new("async")).await.unwrap();
        let post = store
            .posts()
            .save(Post::new("Tagged", "text", category.id, author.id))
            .await
            .unwrap();
        store.posts().set_tags(post.id, &[tag.id]).await.unwrap();

        Seeded {
            store,
            category,
            author,
            tag,
            post,
        }
    }

    impl Seeded {
        async fn links(&self) -> Vec<(Uuid, Uuid)> {
            self.store.state.read().await.post_tags.clone()
        }
    }

    #[tokio::test]
    async fn test_delete_post_removes_its_links_and_keeps_the_tag() {
        let db = seeded().await;
        assert_eq!(db.links().await, vec![(db.post.id, db.tag.id)]);

        db.store.posts().delete(db.post.id).await.unwrap();

        assert!(db.links().await.is_empty());
        assert!(db.store.tags().find_by_id(db.tag.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_author_removes_posts_and_links() {
        let db = seeded().await;

        db.store.users().delete(db.author.id).await.unwrap();

        assert!(db.store.posts().find_by_id(db.post.id).await.unwrap().is_none());
        assert!(db.links().await.is_empty());
        assert!(db.store.categories().find_by_id(db.category.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_category_removes_posts_and_links() {
        let db = seeded().await;

        db.store.categories().delete(db.category.id).await.unwrap();

        assert!(db.store.posts().find_by_id(db.post.id).await.unwrap().is_none());
        assert!(db.links().await.is_empty());
        assert!(db.store.users().find_by_id(db.author.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_tag_removes_links_and_keeps_the_post() {
        let db = seeded().await;

        db.store.tags().delete(db.tag.id).await.unwrap();

        assert!(db.links().await.is_empty());
        assert!(db.store.posts().find_by_id(db.post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cascade_spares_unrelated_posts() {
        let db = seeded().await;
        let other_author = db
            .store
            .users()
            .save(User::new("bob", "bob@example.com"))
            .await
            .unwrap();
        let kept = db
            .store
            .posts()
            .save(Post::new("Kept", "text", db.category.id, other_author.id))
            .await
            .unwrap();
        db.store.posts().set_tags(kept.id, &[db.tag.id]).await.unwrap();

        db.store.users().delete(db.author.id).await.unwrap();

        assert_eq!(db.links().await, vec![(kept.id, db.tag.id)]);
        assert!(db.store.posts().find_by_id(kept.id).await.unwrap().is_some());
    }
}
