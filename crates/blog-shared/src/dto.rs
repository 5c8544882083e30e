//! Data Transfer Objects - request/response types for the API.

use blog_core::domain::{Category, Post, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    /// Left empty, the excerpt is derived from the body.
    #[serde(default)]
    pub excerpt: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    /// Defaults to the time of the request.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

impl CreatePostRequest {
    pub fn into_post(self) -> Post {
        let mut post = Post::new(self.title, self.body, self.category_id, self.author_id)
            .with_excerpt(self.excerpt);
        if let Some(created_time) = self.created_time {
            post.created_time = created_time;
        }
        post
    }
}

/// Request to create a category or a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNamedRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// A post as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub created_time: DateTime<Utc>,
    pub views: u32,
    pub url: String,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        let url = post.absolute_url();
        Self {
            id: post.id,
            title: post.title,
            excerpt: post.excerpt,
            created_time: post.created_time,
            views: post.views,
            url,
        }
    }
}

/// A post with its body and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub views: u32,
    pub tags: Vec<TagResponse>,
    pub url: String,
}

impl PostResponse {
    pub fn new(post: Post, tags: Vec<Tag>) -> Self {
        let url = post.absolute_url();
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            excerpt: post.excerpt,
            created_time: post.created_time,
            modified_time: post.modified_time,
            category_id: post.category_id,
            author_id: post.author_id,
            views: post.views,
            tags: tags.into_iter().map(Into::into).collect(),
            url,
        }
    }
}

/// A model registered with the admin site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminModelResponse {
    pub model: String,
    pub list_display: Vec<String>,
}

/// Change list of one admin model: column headers and projected rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminChangeList {
    pub model: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
