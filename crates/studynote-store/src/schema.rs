//! Schema definitions and migration utilities.
//!
//! Migration SQL is embedded at compile time and applied on startup.
//! All statements use `IF NOT EXISTS` guards, so running them repeatedly
//! is safe.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the users table (001_users.sql).
pub const USERS_MIGRATION: &str = include_str!("../../../migrations/001_users.sql");

/// Embedded migration SQL for the notes table (002_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/002_notes.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running users migration (001_users.sql)...");
    sqlx::raw_sql(USERS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Users migration failed: {}", e)))?;

    tracing::debug!("Running notes migration (002_notes.sql)...");
    sqlx::raw_sql(NOTES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notes` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_migration_embedded() {
        assert!(USERS_MIGRATION.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(USERS_MIGRATION.contains("email"));
        assert!(USERS_MIGRATION.contains("password_hash"));
    }

    #[test]
    fn notes_migration_embedded() {
        assert!(NOTES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(NOTES_MIGRATION.contains("updated_at"));
        assert!(NOTES_MIGRATION.contains("notes_user_updated_idx"));
    }
}
