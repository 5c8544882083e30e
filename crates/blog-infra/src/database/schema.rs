//! Table creation from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityName, EntityTrait, Schema};

use super::entity::{category, post, post_tag, tag, user};

async fn create_table<E: EntityTrait>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}

/// Create every blog table that does not exist yet, parents first.
pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, category::Entity).await?;
    create_table(db, &schema, tag::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, post_tag::Entity).await?;

    tracing::info!("Database schema ready");
    Ok(())
}
