use rocket_db_pools::{Database, sqlx};

#[derive(Database)]
#[database("storefront_db")]
pub struct StoreDb(sqlx::PgPool);

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations. Called from an ignite fairing and from the
/// test database factory.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
