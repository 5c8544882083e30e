//! Admin registration: which models the admin surface exposes and which
//! columns its change lists show.

use crate::domain::{Category, Post, Tag, User};
use crate::error::DomainError;

/// Column name that renders a row through its `Display` implementation.
pub const DISPLAY_COLUMN: &str = "display";

/// Change-list columns of the post admin, in order.
pub const POST_LIST_DISPLAY: &[&str] = &[
    "title",
    "created_time",
    "modified_time",
    "category",
    "author",
];

/// A record the admin can project into change-list columns.
pub trait AdminRow {
    /// Text value of column `name`, or `None` for an unknown column.
    fn column(&self, name: &str) -> Option<String>;
}

/// Per-model admin options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAdmin {
    pub list_display: Vec<&'static str>,
}

impl Default for ModelAdmin {
    fn default() -> Self {
        Self {
            list_display: vec![DISPLAY_COLUMN],
        }
    }
}

impl ModelAdmin {
    pub fn with_list_display(columns: &[&'static str]) -> Self {
        Self {
            list_display: columns.to_vec(),
        }
    }

    /// Project `row` onto the configured columns. Unknown columns render empty.
    pub fn project<R: AdminRow + ?Sized>(&self, row: &R) -> Vec<(&'static str, String)> {
        self.list_display
            .iter()
            .map(|&name| (name, row.column(name).unwrap_or_default()))
            .collect()
    }
}

/// Registry of admin-visible models, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct AdminSite {
    entries: Vec<(&'static str, ModelAdmin)>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: &'static str, admin: ModelAdmin) -> Result<(), DomainError> {
        if self.get(model).is_some() {
            return Err(DomainError::Duplicate(format!(
                "model '{model}' is already registered"
            )));
        }
        tracing::debug!(model, columns = ?admin.list_display, "Registered admin model");
        self.entries.push((model, admin));
        Ok(())
    }

    pub fn get(&self, model: &str) -> Option<&ModelAdmin> {
        self.entries
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, admin)| admin)
    }

    pub fn models(&self) -> impl Iterator<Item = (&'static str, &ModelAdmin)> {
        self.entries.iter().map(|(name, admin)| (*name, admin))
    }
}

/// The blog's admin site: categories and tags with default columns, posts
/// with [`POST_LIST_DISPLAY`].
pub fn blog_site() -> Result<AdminSite, DomainError> {
    let mut site = AdminSite::new();
    site.register("category", ModelAdmin::default())?;
    site.register("post", ModelAdmin::with_list_display(POST_LIST_DISPLAY))?;
    site.register("tag", ModelAdmin::default())?;
    Ok(site)
}

impl AdminRow for Category {
    fn column(&self, name: &str) -> Option<String> {
        match name {
            DISPLAY_COLUMN | "name" => Some(self.name.clone()),
            "id" => Some(self.id.to_string()),
            _ => None,
        }
    }
}

impl AdminRow for Tag {
    fn column(&self, name: &str) -> Option<String> {
        match name {
            DISPLAY_COLUMN | "name" => Some(self.name.clone()),
            "id" => Some(self.id.to_string()),
            _ => None,
        }
    }
}

/// A post joined with the records its foreign keys point at.
#[derive(Debug, Clone, Copy)]
pub struct PostRow<'a> {
    pub post: &'a Post,
    pub category: &'a Category,
    pub author: &'a User,
}

impl AdminRow for PostRow<'_> {
    fn column(&self, name: &str) -> Option<String> {
        let post = self.post;
        match name {
            DISPLAY_COLUMN | "title" => Some(post.title.clone()),
            "id" => Some(post.id.to_string()),
            "created_time" => Some(post.created_time.to_rfc3339()),
            "modified_time" => Some(post.modified_time.to_rfc3339()),
            "excerpt" => Some(post.excerpt.clone()),
            "views" => Some(post.views.to_string()),
            "category" => Some(self.category.to_string()),
            "author" => Some(self.author.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_site_registration_order() {
        let site = blog_site().unwrap();
        let models: Vec<_> = site.models().map(|(name, _)| name).collect();
        assert_eq!(models, ["category", "post", "tag"]);
    }

    #[test]
    fn test_post_list_display() {
        let site = blog_site().unwrap();
        let post_admin = site.get("post").unwrap();
        assert_eq!(
            post_admin.list_display,
            ["title", "created_time", "modified_time", "category", "author"]
        );
        assert_eq!(site.get("category").unwrap().list_display, [DISPLAY_COLUMN]);
    }

    #[test]
    fn test_blog_site_cannot_take_a_second_post_admin() {
        let mut site = blog_site().unwrap();
        let result = site.register("post", ModelAdmin::default());
        assert!(matches!(result, Err(DomainError::Duplicate(_))));
        assert_eq!(site.get("post").unwrap().list_display, POST_LIST_DISPLAY);
    }

    #[test]
    fn test_register_twice_is_rejected() {
        let mut site = AdminSite::new();
        site.register("tag", ModelAdmin::default()).unwrap();
        assert!(matches!(
            site.register("tag", ModelAdmin::default()),
            Err(DomainError::Duplicate(_))
        ));
    }

    #[test]
    fn test_post_row_projection() {
        let category = Category::new("Rust");
        let author = User::new("alice", "alice@example.com");
        let post = Post::new("Ownership", "body", category.id, author.id);
        let row = PostRow {
            post: &post,
            category: &category,
            author: &author,
        };

        let projected = blog_site().unwrap().get("post").unwrap().project(&row);
        let values: Vec<_> = projected.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values[0], "Ownership");
        assert_eq!(values[1], post.created_time.to_rfc3339());
        assert_eq!(values[3], "Rust");
        assert_eq!(values[4], "alice");
    }

    #[test]
    fn test_default_projection_uses_display() {
        let tag = Tag::new("async");
        let projected = ModelAdmin::default().project(&tag);
        assert_eq!(projected, vec![(DISPLAY_COLUMN, "async".to_string())]);
    }
}
