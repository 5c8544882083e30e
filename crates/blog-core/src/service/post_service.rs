//! Post use-case service.
//!
//! Owns the rules that run in the persistence path of a post:
//! - an empty excerpt is derived from the body before the post is stored;
//! - a full save of a stored post refreshes `modified_time`, a first save
//!   keeps the timestamps the post was built with;
//! - a partial save writes only the requested columns;
//! - views only move through [`PostService::increase_views`].

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, SaveOptions, Tag};
use crate::error::DomainError;
use crate::excerpt::{MarkdownRenderer, MarkupRenderer, derive_excerpt};
use crate::ports::PostRepository;

/// Post service facade over a repository implementation.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    renderer: Arc<dyn MarkupRenderer>,
}

impl PostService {
    /// Create a service that renders bodies with [`MarkdownRenderer::blog`].
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self::with_renderer(posts, Arc::new(MarkdownRenderer::blog()))
    }

    pub fn with_renderer(posts: Arc<dyn PostRepository>, renderer: Arc<dyn MarkupRenderer>) -> Self {
        Self { posts, renderer }
    }

    /// Fill an empty excerpt from the body. A non-empty excerpt is kept as is.
    pub fn resolve_excerpt(&self, post: &mut Post) {
        if post.excerpt.is_empty() {
            post.excerpt = derive_excerpt(self.renderer.as_ref(), &post.body);
        }
    }

    /// Store a post, deriving its excerpt first.
    pub async fn save(&self, mut post: Post, options: SaveOptions) -> Result<Post, DomainError> {
        self.resolve_excerpt(&mut post);
        post.validate()?;

        let saved = match options.update_fields {
            Some(fields) if fields.is_empty() => post,
            Some(fields) => self.posts.save_fields(post, &fields).await?,
            None => {
                if self.posts.find_by_id(post.id).await?.is_some() {
                    post.modified_time = Utc::now();
                }
                self.posts.save(post).await?
            }
        };

        tracing::debug!(post_id = %saved.id, excerpt_len = saved.excerpt.chars().count(), "Post saved");
        Ok(saved)
    }

    /// Count one view of `post`, writing only the counter.
    pub async fn increase_views(&self, post: &mut Post) -> Result<(), DomainError> {
        post.views = self.posts.increment_views(post.id).await?;
        tracing::debug!(post_id = %post.id, views = post.views, "Post view counted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    /// Load a post for its detail view and count the view.
    pub async fn view(&self, id: Uuid) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        self.increase_views(&mut post).await?;
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list().await?)
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_category(category_id).await?)
    }

    pub async fn list_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_tag(tag_id).await?)
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }

    pub async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), DomainError> {
        let mut unique = tag_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        Ok(self.posts.set_tags(post_id, &unique).await?)
    }

    pub async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, DomainError> {
        Ok(self.posts.tags_of(post_id).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::PostField;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Records which storage calls the service makes.
    #[derive(Default)]
    struct RecordingRepo {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingRepo {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for RecordingRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            self.record("find_by_id");
            Ok(None)
        }

        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            self.record("save");
            Ok(post)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            self.record("delete");
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepo {
        async fn save_fields(&self, post: Post, fields: &[PostField]) -> Result<Post, RepoError> {
            let names: Vec<_> = fields.iter().map(|f| f.as_str()).collect();
            self.record(format!("save_fields({})", names.join(",")));
            Ok(post)
        }

        async fn increment_views(&self, _id: Uuid) -> Result<u32, RepoError> {
            self.record("increment_views");
            Ok(7)
        }

        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_category(&self, _category_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_author(&self, _author_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_tag(&self, _tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn set_tags(&self, _post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
            self.record(format!("set_tags({})", tag_ids.len()));
            Ok(())
        }

        async fn tags_of(&self, _post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
            Ok(Vec::new())
        }
    }

    struct Shouting;

    impl MarkupRenderer for Shouting {
        fn render(&self, source: &str) -> String {
            format!("<p>{}</p>", source.to_uppercase())
        }
    }

    fn service() -> (Arc<RecordingRepo>, PostService) {
        let repo = Arc::new(RecordingRepo::default());
        let service = PostService::new(repo.clone());
        (repo, service)
    }

    fn post() -> Post {
        Post::new("Title", "body", Uuid::new_v4(), Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_full_save_goes_through_save() {
        let (repo, service) = service();
        let post = post();
        let saved = service.save(post.clone(), SaveOptions::default()).await.unwrap();
        assert_eq!(repo.calls(), ["find_by_id", "save"]);
        assert_eq!(saved.modified_time, post.modified_time);
    }

    #[tokio::test]
    async fn test_partial_save_names_its_columns() {
        let (repo, service) = service();
        service
            .save(post(), SaveOptions::update_fields([PostField::Title, PostField::Excerpt]))
            .await
            .unwrap();
        assert_eq!(repo.calls(), ["save_fields(title,excerpt)"]);
    }

    #[tokio::test]
    async fn test_empty_update_fields_writes_nothing() {
        let (repo, service) = service();
        let saved = service
            .save(post(), SaveOptions::update_fields(Vec::<PostField>::new()))
            .await
            .unwrap();
        assert!(repo.calls().is_empty());
        assert_eq!(saved.excerpt, "body");
    }

    #[tokio::test]
    async fn test_increase_views_takes_stored_count() {
        let (repo, service) = service();
        let mut post = post();
        service.increase_views(&mut post).await.unwrap();
        assert_eq!(post.views, 7);
        assert_eq!(repo.calls(), ["increment_views"]);
    }

    #[tokio::test]
    async fn test_set_tags_dedups_ids() {
        let (repo, service) = service();
        let tag = Uuid::new_v4();
        service.set_tags(Uuid::new_v4(), &[tag, tag]).await.unwrap();
        assert_eq!(repo.calls(), ["set_tags(1)"]);
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let (_, service) = service();
        assert!(matches!(
            service.get(Uuid::new_v4()).await,
            Err(DomainError::NotFound { entity_type: "Post", .. })
        ));
    }

    #[test]
    fn test_custom_renderer() {
        let service =
            PostService::with_renderer(Arc::new(RecordingRepo::default()), Arc::new(Shouting));
        let mut post = post();
        service.resolve_excerpt(&mut post);
        assert_eq!(post.excerpt, "BODY");
    }
}
