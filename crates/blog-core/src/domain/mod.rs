//! Domain entities - the core business objects.

mod category;
mod post;
mod tag;
mod user;

pub use category::Category;
pub use post::{EXCERPT_MAX_CHARS, Post, PostField, SaveOptions, TITLE_MAX_CHARS};
pub use tag::Tag;
pub use user::User;

use crate::error::DomainError;

/// Maximum length of a category or tag name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Shared rule for the short `name` column of categories and tags.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid("name", format!("{kind} name must not be blank")));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(DomainError::invalid(
            "name",
            format!("{kind} name longer than {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}
