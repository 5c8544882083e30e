use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, PostField, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::{MemoryState, upsert};

/// In-memory post repository.
pub struct InMemoryPostRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }

    /// Posts matching `keep`, newest first. The sort is stable, so equal
    /// timestamps keep insertion order.
    async fn posts_where(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state.posts.iter().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        posts
    }
}

fn check_references(state: &MemoryState, post: &Post) -> Result<(), RepoError> {
    if !state.categories.iter().any(|c| c.id == post.category_id) {
        return Err(RepoError::Constraint(format!(
            "category {} does not exist",
            post.category_id
        )));
    }
    if !state.users.iter().any(|u| u.id == post.author_id) {
        return Err(RepoError::Constraint(format!(
            "author {} does not exist",
            post.author_id
        )));
    }
    Ok(())
}

fn copy_field(target: &mut Post, source: &Post, field: PostField) {
    match field {
        PostField::Title => target.title = source.title.clone(),
        PostField::Body => target.body = source.body.clone(),
        PostField::CreatedTime => target.created_time = source.created_time,
        PostField::ModifiedTime => target.modified_time = source.modified_time,
        PostField::Excerpt => target.excerpt = source.excerpt.clone(),
        PostField::CategoryId => target.category_id = source.category_id,
        PostField::AuthorId => target.author_id = source.author_id,
        PostField::Views => target.views = source.views,
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        check_references(&state, &post)?;
        upsert(&mut state.posts, &post, |p| p.id);
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.delete_posts_where(|p| p.id == id) == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save_fields(&self, post: Post, fields: &[PostField]) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        check_references(&state, &post)?;

        let stored = state
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        for field in fields {
            copy_field(stored, &post, *field);
        }
        Ok(stored.clone())
    }

    async fn increment_views(&self, id: Uuid) -> Result<u32, RepoError> {
        let mut state = self.state.write().await;
        let stored = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        stored.views = stored.views.saturating_add(1);
        Ok(stored.views)
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts_where(|_| true).await)
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts_where(|p| p.category_id == category_id).await)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts_where(|p| p.author_id == author_id).await)
    }

    async fn find_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tagged: Vec<Uuid> = {
            let state = self.state.read().await;
            state
                .post_tags
                .iter()
                .filter(|(_, t)| *t == tag_id)
                .map(|(p, _)| *p)
                .collect()
        };
        Ok(self.posts_where(|p| tagged.contains(&p.id)).await)
    }

    async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(RepoError::NotFound);
        }
        if let Some(missing) = tag_ids
            .iter()
            .find(|id| !state.tags.iter().any(|t| t.id == **id))
        {
            return Err(RepoError::Constraint(format!("tag {missing} does not exist")));
        }

        state.post_tags.retain(|(p, _)| *p != post_id);
        for &tag_id in tag_ids {
            if !state.post_tags.contains(&(post_id, tag_id)) {
                state.post_tags.push((post_id, tag_id));
            }
        }
        Ok(())
    }

    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|t| state.post_tags.contains(&(post_id, t.id)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
