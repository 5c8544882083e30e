//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(70))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(indexed)]
    pub created_time: DateTimeWithTimeZone,
    pub modified_time: DateTimeWithTimeZone,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub excerpt: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    #[sea_orm(default_value = 0)]
    pub views: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stored counters are never negative; clamp instead of wrapping on read.
pub(crate) fn views_from_column(views: i64) -> u32 {
    u32::try_from(views.max(0)).unwrap_or(u32::MAX)
}

/// Map a domain field to its column.
pub(crate) fn column_of(field: blog_core::domain::PostField) -> Column {
    use blog_core::domain::PostField;

    match field {
        PostField::Title => Column::Title,
        PostField::Body => Column::Body,
        PostField::CreatedTime => Column::CreatedTime,
        PostField::ModifiedTime => Column::ModifiedTime,
        PostField::Excerpt => Column::Excerpt,
        PostField::CategoryId => Column::CategoryId,
        PostField::AuthorId => Column::AuthorId,
        PostField::Views => Column::Views,
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for blog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            created_time: model.created_time.into(),
            modified_time: model.modified_time.into(),
            excerpt: model.excerpt,
            category_id: model.category_id,
            author_id: model.author_id,
            views: views_from_column(model.views),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<blog_core::domain::Post> for ActiveModel {
    fn from(post: blog_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            body: Set(post.body),
            created_time: Set(post.created_time.into()),
            modified_time: Set(post.modified_time.into()),
            excerpt: Set(post.excerpt),
            category_id: Set(post.category_id),
            author_id: Set(post.author_id),
            views: Set(i64::from(post.views)),
        }
    }
}
