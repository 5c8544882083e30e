//! Category and tag handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Category, Tag};
use blog_core::ports::{BaseRepository, CategoryRepository, TagRepository};
use blog_shared::ApiResponse;
use blog_shared::dto::{CategoryResponse, CreateNamedRequest, PostSummary, TagResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn summaries(posts: Vec<blog_core::domain::Post>) -> Vec<PostSummary> {
    posts.into_iter().map(Into::into).collect()
}

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories: Vec<CategoryResponse> = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CreateNamedRequest>,
) -> AppResult<HttpResponse> {
    let category = Category::new(body.into_inner().name);
    category.validate()?;
    let saved = state.categories.save(category).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(CategoryResponse::from(saved))))
}

/// GET /api/categories/{id}/posts
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.categories.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Category with id {id} not found")));
    }
    let posts = state.posts.list_by_category(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries(posts))))
}

/// GET /api/tags
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags: Vec<TagResponse> = state
        .tags
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    state: web::Data<AppState>,
    body: web::Json<CreateNamedRequest>,
) -> AppResult<HttpResponse> {
    let tag = Tag::new(body.into_inner().name);
    tag.validate()?;
    let saved = state.tags.save(tag).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(TagResponse::from(saved))))
}

/// GET /api/tags/{id}/posts
pub async fn tag_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.tags.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Tag with id {id} not found")));
    }
    let posts = state.posts.list_by_tag(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries(posts))))
}
