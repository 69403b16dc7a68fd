//! Note entity model and DTOs.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use stickynotes_core::notes::NoteInput;
use stickynotes_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub author_id: DbId,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// DTO for creating a note. The author comes from the session, not from here.
#[derive(Debug)]
pub struct CreateNote {
    pub title: String,
    pub body: String,
}

/// DTO for updating a note. Only the text fields are writable.
#[derive(Debug)]
pub struct UpdateNote {
    pub title: String,
    pub body: String,
}

impl From<NoteInput> for CreateNote {
    fn from(input: NoteInput) -> Self {
        Self {
            title: input.title,
            body: input.body,
        }
    }
}

impl From<NoteInput> for UpdateNote {
    fn from(input: NoteInput) -> Self {
        Self {
            title: input.title,
            body: input.body,
        }
    }
}
