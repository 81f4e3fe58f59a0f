use chrono::Utc;
use sqlx::{migrate::MigrateDatabase, query, query_as, sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::models::Todo;

const SCHEMA: &str = r#"CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);"#;

/// All access to the `todos` table goes through here. Each operation is a
/// single statement; there are no multi-statement transactions.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: Pool<Sqlite>,
}

impl TodoStore {
    /// Opens (creating the database file if needed) and bootstraps the schema.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database for tests. Pinned to a single connection that never
    /// recycles, since every SQLite connection gets its own `:memory:` store.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Every row, newest first. An empty list is a normal result.
    pub async fn list_all(&self) -> Result<Vec<Todo>, sqlx::Error> {
        query_as::<_, Todo>(
            "SELECT id, title, completed, created_at FROM todos ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Stores a new row and returns it as persisted. Title validation happens
    /// before this call; any string handed in here is stored verbatim.
    pub async fn insert(&self, title: &str) -> Result<Todo, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        query_as::<_, Todo>(
            "INSERT INTO todos (id, title, completed, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, title, completed, created_at",
        )
        .bind(id)
        .bind(title)
        .bind(false)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Single-row update; silently does nothing when no row matches `id`.
    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<(), sqlx::Error> {
        query("UPDATE todos SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Shuts the pool down so tests can provoke storage failures.
    #[cfg(test)]
    pub(crate) async fn close(&self) {
        self.pool.close().await;
    }

    /// Single-row delete; silently does nothing when no row matches `id`.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), sqlx::Error> {
        query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
