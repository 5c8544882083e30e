//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::admin::{self, AdminSite};
use blog_core::error::DomainError;
use blog_core::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};
use blog_core::service::PostService;
use blog_infra::InMemoryStore;
use blog_infra::database::DatabaseConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub admin: Arc<AdminSite>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Result<Self, DomainError> {
        #[cfg(feature = "postgres")]
        {
            use blog_infra::database::DatabaseConnections;

            match db_config {
                Some(config) => match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(&connections);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                },
                None => {
                    tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        Self::in_memory()
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let store = InMemoryStore::new();
        Self::from_repositories(
            Arc::new(store.posts()),
            Arc::new(store.categories()),
            Arc::new(store.tags()),
            Arc::new(store.users()),
        )
    }

    #[cfg(feature = "postgres")]
    fn postgres(
        connections: &blog_infra::database::DatabaseConnections,
    ) -> Result<Self, DomainError> {
        use blog_infra::database::{
            PostgresCategoryRepository, PostgresPostRepository, PostgresTagRepository,
            PostgresUserRepository,
        };

        let db = &connections.main;
        Self::from_repositories(
            Arc::new(PostgresPostRepository::new(db.clone())),
            Arc::new(PostgresCategoryRepository::new(db.clone())),
            Arc::new(PostgresTagRepository::new(db.clone())),
            Arc::new(PostgresUserRepository::new(db.clone())),
        )
    }

    fn from_repositories(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            posts: PostService::new(posts),
            categories,
            tags,
            users,
            admin: Arc::new(admin::blog_site()?),
        })
    }
}
