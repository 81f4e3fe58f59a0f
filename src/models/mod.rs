use chrono::{DateTime, Utc};

/// One stored todo row. `title` and `created_at` never change after insert;
/// only `completed` is ever updated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
