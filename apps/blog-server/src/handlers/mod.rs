//! HTTP handlers and route configuration.

mod admin;
mod health;
mod posts;
mod taxonomy;
mod users;

use actix_web::web;
use blog_core::urls;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(taxonomy::list_categories))
                    .route("", web::post().to(taxonomy::create_category))
                    .route("/{id}/posts", web::get().to(taxonomy::category_posts)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::get().to(taxonomy::list_tags))
                    .route("", web::post().to(taxonomy::create_tag))
                    .route("/{id}/posts", web::get().to(taxonomy::tag_posts)),
            )
            .route("/users", web::post().to(users::create_user)),
    )
    .service(
        web::resource(urls::POST_DETAIL_PATTERN)
            .name(urls::POST_DETAIL)
            .route(web::get().to(posts::post_detail)),
    )
    .service(
        web::scope("/admin")
            .route("/", web::get().to(admin::index))
            .route("/{model}/", web::get().to(admin::change_list)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use blog_core::domain::{Category, Post, SaveOptions, Tag, User};
    use blog_core::ports::BaseRepository;
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::state::AppState;

    async fn seeded() -> (AppState, Category, User) {
        let state = AppState::in_memory().unwrap();
        let category = state.categories.save(Category::new("Rust")).await.unwrap();
        let author = state
            .users
            .save(User::new("alice", "alice@example.com"))
            .await
            .unwrap();
        (state, category, author)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!(AppState::in_memory().unwrap());
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_create_post_derives_excerpt() {
        let (state, category, author) = seeded().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "Hello",
                "body": "# Hello\n\nThis is **markdown**.",
                "category_id": category.id,
                "author_id": author.id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap();
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["excerpt"], "Hello\nThis is markdown.");
        assert_eq!(body["data"]["views"], 0);
        assert_eq!(location, format!("/post/{}/", body["data"]["id"].as_str().unwrap()));
    }

    #[actix_web::test]
    async fn test_create_post_with_unknown_category_conflicts() {
        let (state, _, author) = seeded().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "Orphan",
                "body": "text",
                "category_id": uuid::Uuid::new_v4(),
                "author_id": author.id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_overlong_title_is_unprocessable() {
        let (state, category, author) = seeded().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "t".repeat(71),
                "body": "text",
                "category_id": category.id,
                "author_id": author.id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_detail_route_counts_views() {
        let (state, category, author) = seeded().await;
        let post = state
            .posts
            .save(
                Post::new("Counted", "text", category.id, author.id),
                SaveOptions::default(),
            )
            .await
            .unwrap();
        let app = app!(state);

        for expected in [1, 2] {
            let req = test::TestRequest::get().uri(&post.absolute_url()).to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["data"]["views"], expected);
            assert_eq!(body["data"]["title"], "Counted");
        }

        let stored = state.posts.get(post.id).await.unwrap();
        assert_eq!(stored.views, 2);
        assert_eq!(stored.modified_time, post.modified_time);
    }

    #[actix_web::test]
    async fn test_delete_post_unlinks_tags() {
        let (state, category, author) = seeded().await;
        let tag = state.tags.save(Tag::new("rust")).await.unwrap();
        let post = state
            .posts
            .save(
                Post::new("Short lived", "text", category.id, author.id),
                SaveOptions::default(),
            )
            .await
            .unwrap();
        state.posts.set_tags(post.id, &[tag.id]).await.unwrap();
        let app = app!(state);

        let tagged_uri = format!("/api/tags/{}/posts", tag.id);
        let req = test::TestRequest::get().uri(&tagged_uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&tagged_uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
        assert!(state.posts.tags_of(post.id).await.unwrap().is_empty());

        let req = test::TestRequest::get().uri(&post.absolute_url()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_detail_of_missing_post() {
        let app = app!(AppState::in_memory().unwrap());
        let uri = format!("/post/{}/", uuid::Uuid::new_v4());
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_category_posts_of_missing_category() {
        let app = app!(AppState::in_memory().unwrap());
        let uri = format!("/api/categories/{}/posts", uuid::Uuid::new_v4());
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_admin_post_change_list() {
        let (state, category, author) = seeded().await;
        let post = state
            .posts
            .save(
                Post::new("Ownership", "text", category.id, author.id),
                SaveOptions::default(),
            )
            .await
            .unwrap();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/admin/post/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"]["columns"],
            json!(["title", "created_time", "modified_time", "category", "author"])
        );
        assert_eq!(
            body["data"]["rows"][0],
            json!([
                "Ownership",
                post.created_time.to_rfc3339(),
                post.modified_time.to_rfc3339(),
                "Rust",
                "alice"
            ])
        );
    }

    #[actix_web::test]
    async fn test_admin_index_and_unknown_model() {
        let app = app!(AppState::in_memory().unwrap());

        let req = test::TestRequest::get().uri("/admin/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let models: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|m| m["model"].as_str())
            .collect();
        assert_eq!(models, ["category", "post", "tag"]);

        let req = test::TestRequest::get().uri("/admin/user/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
