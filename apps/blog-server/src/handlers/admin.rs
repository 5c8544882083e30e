//! Read-only admin change lists.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::admin::{AdminRow, ModelAdmin, PostRow};
use blog_core::domain::{Category, User};
use blog_core::ports::{BaseRepository, CategoryRepository, TagRepository};
use blog_shared::ApiResponse;
use blog_shared::dto::{AdminChangeList, AdminModelResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /admin/
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let models: Vec<AdminModelResponse> = state
        .admin
        .models()
        .map(|(model, admin)| AdminModelResponse {
            model: model.to_string(),
            list_display: admin.list_display.iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    HttpResponse::Ok().json(ApiResponse::ok(models))
}

/// GET /admin/{model}/
pub async fn change_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let model = path.into_inner();
    let admin = state
        .admin
        .get(&model)
        .ok_or_else(|| AppError::NotFound(format!("model '{model}' is not registered")))?;

    let rows = match model.as_str() {
        "category" => project_all(admin, &state.categories.list().await?),
        "tag" => project_all(admin, &state.tags.list().await?),
        "post" => post_rows(&state, admin).await?,
        _ => return Err(AppError::NotFound(format!("no change list for '{model}'"))),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AdminChangeList {
        columns: admin.list_display.iter().map(|c| c.to_string()).collect(),
        model,
        rows,
    })))
}

fn project_all<R: AdminRow>(admin: &ModelAdmin, records: &[R]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| admin.project(record).into_iter().map(|(_, v)| v).collect())
        .collect()
}

async fn post_rows(state: &AppState, admin: &ModelAdmin) -> AppResult<Vec<Vec<String>>> {
    let posts = state.posts.list().await?;
    let mut categories: HashMap<Uuid, Category> = HashMap::new();
    let mut authors: HashMap<Uuid, User> = HashMap::new();

    for post in &posts {
        if !categories.contains_key(&post.category_id) {
            let category = state
                .categories
                .find_by_id(post.category_id)
                .await?
                .ok_or_else(|| AppError::Internal(format!("post {} has no category", post.id)))?;
            categories.insert(post.category_id, category);
        }
        if !authors.contains_key(&post.author_id) {
            let author = state
                .users
                .find_by_id(post.author_id)
                .await?
                .ok_or_else(|| AppError::Internal(format!("post {} has no author", post.id)))?;
            authors.insert(post.author_id, author);
        }
    }

    let mut rows = Vec::with_capacity(posts.len());
    for post in &posts {
        let (Some(category), Some(author)) = (
            categories.get(&post.category_id),
            authors.get(&post.author_id),
        ) else {
            continue;
        };
        let row = PostRow {
            post,
            category,
            author,
        };
        rows.push(admin.project(&row).into_iter().map(|(_, v)| v).collect());
    }
    Ok(rows)
}
