//! Post handlers.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::SaveOptions;
use blog_core::ports::BaseRepository;
use blog_shared::ApiResponse;
use blog_shared::dto::{CreatePostRequest, PostResponse, PostSummary};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let summaries: Vec<PostSummary> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let tag_ids = req.tag_ids.clone();

    for tag_id in &tag_ids {
        if state.tags.find_by_id(*tag_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("unknown tag {tag_id}")));
        }
    }

    let saved = state
        .posts
        .save(req.into_post(), SaveOptions::default())
        .await?;
    if !tag_ids.is_empty() {
        state.posts.set_tags(saved.id, &tag_ids).await?;
    }
    let tags = state.posts.tags_of(saved.id).await?;

    tracing::info!(post_id = %saved.id, "Post created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, saved.absolute_url()))
        .json(ApiResponse::ok(PostResponse::new(saved, tags))))
}

/// GET /post/{pk}/ - the `blog:detail` route. Each hit counts one view.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.view(path.into_inner()).await?;
    let tags = state.posts.tags_of(post.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::new(post, tags))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
