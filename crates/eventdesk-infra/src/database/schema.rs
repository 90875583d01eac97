//! Table bootstrap from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{attendee, event, user};

/// Create any missing table. Existing tables are left untouched.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    // Referenced tables first.
    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, event::Entity).await?;
    create_table(db, &schema, attendee::Entity).await?;

    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr> {
    let table = entity.table_name().to_string();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(db.get_database_backend().build(&statement))
        .await?;
    tracing::debug!(%table, "Table ensured");

    Ok(())
}
