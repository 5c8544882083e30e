//! Categories and tags.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Category, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CategoryRepository, TagRepository};

use super::{MemoryState, upsert};

/// In-memory category repository. Deleting a category deletes its posts.
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryCategoryRepository {
    pub(crate) fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut state = self.state.write().await;
        upsert(&mut state.categories, &category, |c| c.id);
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Err(RepoError::NotFound);
        }

        let posts = state.delete_posts_where(|post| post.category_id == id);
        tracing::debug!(category_id = %id, posts, "Category deleted with its posts");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .iter()
            .filter(|c| c.name == name)
            .cloned()
            .collect())
    }
}

/// In-memory tag repository. Deleting a tag only unlinks it from posts.
pub struct InMemoryTagRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryTagRepository {
    pub(crate) fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let state = self.state.read().await;
        Ok(state.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn save(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut state = self.state.write().await;
        upsert(&mut state.tags, &tag, |t| t.id);
        Ok(tag)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let before = state.tags.len();
        state.tags.retain(|t| t.id != id);
        if state.tags.len() == before {
            return Err(RepoError::NotFound);
        }

        state.post_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let state = self.state.read().await;
        let mut tags = state.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, RepoError> {
        let state = self.state.read().await;
        Ok(state.tags.iter().filter(|t| t.name == name).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::InMemoryStore;
    use super::*;

    #[tokio::test]
    async fn test_categories_listed_by_name_and_names_may_repeat() {
        let store = InMemoryStore::new();
        let categories = store.categories();
        categories.save(Category::new("Rust")).await.unwrap();
        categories.save(Category::new("Go")).await.unwrap();
        categories.save(Category::new("Rust")).await.unwrap();

        let names: Vec<_> = categories
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Go", "Rust", "Rust"]);
        assert_eq!(categories.find_by_name("Rust").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_existing_tag_updates_in_place() {
        let store = InMemoryStore::new();
        let tags = store.tags();
        let mut tag = tags.save(Tag::new("asyc")).await.unwrap();
        tag.name = "async".to_string();
        tags.save(tag.clone()).await.unwrap();

        let all = tags.list().await.unwrap();
        assert_eq!(all, vec![tag]);
    }

    #[tokio::test]
    async fn test_delete_missing_category() {
        let store = InMemoryStore::new();
        let result = store.categories().delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
