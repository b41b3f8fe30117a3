//! Shared helpers for tests that need a live database.
//!
//! Tests calling [`get_db`] skip themselves when no database is reachable
//! or when `SKIP_DB_TESTS` is set, so the suite stays green on machines
//! without Postgres.

use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connect to the configured database and make sure the schema is
/// migrated. Migrations run once per test binary.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect().await?;
    MIGRATED
        .get_or_try_init(|| async { Migrator::up(&db, None).await })
        .await?;
    Ok(db)
}
