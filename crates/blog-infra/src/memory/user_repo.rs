use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, UserRepository};

use super::{MemoryState, upsert};

/// In-memory user repository. Deleting a user deletes the posts they wrote.
pub struct InMemoryUserRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryUserRepository {
    pub(crate) fn new(state: Arc<RwLock<MemoryState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|user| user.id == id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;

        let taken = state
            .users
            .iter()
            .any(|other| other.username == user.username && other.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        upsert(&mut state.users, &user, |u| u.id);
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        if state.users.len() == before {
            return Err(RepoError::NotFound);
        }

        let posts = state.delete_posts_where(|post| post.author_id == id);
        tracing::debug!(user_id = %id, posts, "User deleted with their posts");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }
}
