use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::urls::{self, Route};

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 70;

/// Maximum length of a stored excerpt, in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Post entity - a blog article.
///
/// Tags are not carried on the record; they live in the post/tag join
/// relation and are managed through `PostRepository::set_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Markdown source.
    pub body: String,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    /// Plain-text summary. Derived from `body` on save when empty.
    pub excerpt: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub views: u32,
}

impl Post {
    /// Create a new, unsaved post with an empty excerpt and no views.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category_id: Uuid,
        author_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            created_time: now,
            modified_time: now,
            excerpt: String::new(),
            category_id,
            author_id,
            views: 0,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Check the column constraints that do not need storage access.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::invalid("title", "must not be blank"));
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::invalid(
                "title",
                format!("longer than {TITLE_MAX_CHARS} characters"),
            ));
        }
        if self.excerpt.chars().count() > EXCERPT_MAX_CHARS {
            return Err(DomainError::invalid(
                "excerpt",
                format!("longer than {EXCERPT_MAX_CHARS} characters"),
            ));
        }
        Ok(())
    }

    /// Canonical address of this post's detail view.
    pub fn absolute_url(&self) -> String {
        urls::reverse(&Route::PostDetail { pk: self.id })
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Persisted columns of a post, used to request partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Title,
    Body,
    CreatedTime,
    ModifiedTime,
    Excerpt,
    CategoryId,
    AuthorId,
    Views,
}

impl PostField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Body => "body",
            PostField::CreatedTime => "created_time",
            PostField::ModifiedTime => "modified_time",
            PostField::Excerpt => "excerpt",
            PostField::CategoryId => "category_id",
            PostField::AuthorId => "author_id",
            PostField::Views => "views",
        }
    }
}

/// Options forwarded to the storage layer when a post is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// When set, only these columns are written and the row must already exist.
    pub update_fields: Option<Vec<PostField>>,
}

impl SaveOptions {
    pub fn update_fields(fields: impl IntoIterator<Item = PostField>) -> Self {
        Self {
            update_fields: Some(fields.into_iter().collect()),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.update_fields.is_some()
    }

    /// Whether `field` is written by a save with these options.
    pub fn writes(&self, field: PostField) -> bool {
        self.update_fields
            .as_ref()
            .is_none_or(|fields| fields.contains(&field))
    }
}
