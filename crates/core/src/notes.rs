//! Note form binding and validation.
//!
//! The form only ever carries `title` and `body`. Ownership and timestamps are
//! set by the server, so any other submitted key is dropped during
//! deserialization.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{FieldErrors, REQUIRED_MESSAGE};

/// Maximum length of a note title, in characters.
pub const MAX_TITLE_LENGTH: u64 = 100;

/// Raw note form as submitted by the browser.
///
/// Missing inputs deserialize to empty strings so that they are reported as
/// field errors instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NoteForm {
    #[serde(default)]
    #[validate(length(max = MAX_TITLE_LENGTH, message = "Ensure this value has at most 100 characters."))]
    pub title: String,

    #[serde(default)]
    pub body: String,
}

/// A note form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub body: String,
}

impl NoteForm {
    /// Prefill a form from existing values (edit page).
    pub fn with_values(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Clean and validate a submitted note form.
///
/// Leading and trailing whitespace is stripped first, so a blank title counts
/// as missing.
pub fn validate_note_form(form: &NoteForm) -> Result<NoteInput, FieldErrors> {
    let cleaned = NoteForm {
        title: form.title.trim().to_string(),
        body: form.body.trim().to_string(),
    };

    let mut errors = cleaned
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    if cleaned.title.is_empty() {
        errors.add("title", REQUIRED_MESSAGE);
    }
    if cleaned.body.is_empty() {
        errors.add("body", REQUIRED_MESSAGE);
    }

    errors.into_result(NoteInput {
        title: cleaned.title,
        body: cleaned.body,
    })
}
