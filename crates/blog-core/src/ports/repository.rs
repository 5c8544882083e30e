use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, PostField, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository. Deleting a category deletes its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories, ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, RepoError>;
}

/// Tag repository. Deleting a tag only removes its post links.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// All tags, ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, RepoError>;
}

/// Post repository.
///
/// Every listing is ordered by `created_time`, newest first.
/// `save` rejects posts whose category or author does not exist.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Write only `fields` of an existing post.
    async fn save_fields(&self, post: Post, fields: &[PostField]) -> Result<Post, RepoError>;

    /// Add one to the stored view counter in a single storage operation and
    /// return the new value.
    async fn increment_views(&self, id: Uuid) -> Result<u32, RepoError>;

    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Replace the tag set of a post.
    async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Tags attached to a post, ordered by name.
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;
}
