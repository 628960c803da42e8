//! Schema setup for the questions table

use sqlx::SqlitePool;

use super::repos::DbError;

/// Create the questions table and its indexes if they don't exist.
///
/// `AUTOINCREMENT` keeps deleted ids from ever being handed out again.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::debug!("running migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL CHECK (length(text) BETWEEN 1 AND 500),
            votes INTEGER NOT NULL DEFAULT 0 CHECK (votes >= 0),
            hidden INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_votes ON questions(votes DESC)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_created ON questions(created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
