//! Named routes and URL reversal.
//!
//! The HTTP layer registers its resources with these names and patterns, so a
//! reversed URL always resolves to the matching handler.

use uuid::Uuid;

/// Route name of the post detail view.
pub const POST_DETAIL: &str = "blog:detail";

/// Path pattern of the post detail view, in actix-web syntax.
pub const POST_DETAIL_PATTERN: &str = "/post/{pk}/";

/// A named route together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PostDetail { pk: Uuid },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::PostDetail { .. } => POST_DETAIL,
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Route::PostDetail { .. } => POST_DETAIL_PATTERN,
        }
    }
}

/// Build the path for `route` by substituting its parameters into the pattern.
pub fn reverse(route: &Route) -> String {
    match route {
        Route::PostDetail { pk } => route.pattern().replace("{pk}", &pk.to_string()),
    }
}
