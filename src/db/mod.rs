use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use log::info;
use crate::config::Config;

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    info!("Database pool ready ({} max connections)", config.max_connections);
    Ok(pool)
}

/// Applies the embedded migrations, creating the `employees` table and its
/// unique index on `employee_code` when missing.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
