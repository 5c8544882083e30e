//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Category, Post, PostField, Tag, User};
use blog_core::error::RepoError;
use blog_core::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::error::map_db_err;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl PostgresPostRepository {
    async fn posts_where(&self, condition: sea_orm::Condition) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedTime)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save_fields(&self, post: Post, fields: &[PostField]) -> Result<Post, RepoError> {
        let full: post::ActiveModel = post.into();
        let mut partial = post::ActiveModel {
            id: full.id.clone(),
            ..<post::ActiveModel as ActiveModelTrait>::default()
        };

        for field in fields {
            let column = post::column_of(*field);
            if let Some(value) = full.get(column).into_value() {
                partial.set(column, value);
            }
        }

        let model = partial.update(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(post_id = %model.id, ?fields, "Post columns updated");
        Ok(model.into())
    }

    async fn increment_views(&self, id: Uuid) -> Result<u32, RepoError> {
        let updated = PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        let model = updated.into_iter().next().ok_or(RepoError::NotFound)?;
        Ok(post::views_from_column(model.views))
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        self.posts_where(sea_orm::Condition::all()).await
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.posts_where(sea_orm::Condition::all().add(post::Column::CategoryId.eq(category_id)))
            .await
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.posts_where(sea_orm::Condition::all().add(post::Column::AuthorId.eq(author_id)))
            .await
    }

    async fn find_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                post::Relation::PostTag.def(),
            )
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::CreatedTime)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(RepoError::NotFound);
        }

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if !tag_ids.is_empty() {
            let links = tag_ids.iter().map(|&tag_id| post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tag_id),
            });
            PostTagEntity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(%post_id, tags = tag_ids.len(), "Post tags replaced");
        Ok(())
    }

    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(sea_orm::JoinType::InnerJoin, tag::Relation::PostTag.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
