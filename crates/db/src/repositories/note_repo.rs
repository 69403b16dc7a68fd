//! Repository for the `notes` table.
//!
//! Every read, update and delete is scoped by `author_id` in the same
//! statement as the id lookup. A note owned by someone else is therefore
//! indistinguishable from a note that does not exist: both come back as
//! `None` / `false`.

use chrono::Utc;
use sqlx::SqlitePool;
use stickynotes_core::types::DbId;

use crate::models::note::{CreateNote, Note, UpdateNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, body, created_at, author_id";

/// Provides ownership-scoped CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note owned by `author_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        author_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (title, body, created_at, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(Utc::now())
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// List every note owned by `author_id`, newest first.
    pub async fn list_by_author(
        pool: &SqlitePool,
        author_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE author_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Find a note by id, only if it is owned by `author_id`.
    pub async fn find_owned(
        pool: &SqlitePool,
        id: DbId,
        author_id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND author_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(author_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the title and body of a note owned by `author_id`.
    ///
    /// `id`, `created_at` and `author_id` are never written. Returns `None`
    /// if no owned note matched.
    pub async fn update_owned(
        pool: &SqlitePool,
        id: DbId,
        author_id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET title = $3, body = $4
             WHERE id = $1 AND author_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note owned by `author_id`. Returns `true` if a row was deleted.
    pub async fn delete_owned(
        pool: &SqlitePool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the notes owned by `author_id`.
    pub async fn count_by_author(pool: &SqlitePool, author_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await
    }
}
