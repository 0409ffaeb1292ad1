use crate::error::*;
use crate::infra::DBConnector;

pub const SCHEMA: &str = include_str!("../../migrations/2024-01-01-000000_create_tables/up.sql");

/// Creates the `users`, `tweets` and `likes` tables when they are missing.
pub async fn run(db: &DBConnector) -> Result<()> {
    db.batch_execute(SCHEMA).await?;
    log::info!("database schema is up to date");
    Ok(())
}
