//! Handlers for the note pages.
//!
//! Every handler takes [`AuthUser`] first, so an anonymous request is sent to
//! the login page before anything else about it is looked at. Single-note
//! handlers go through the ownership gate in [`NoteRepo`]: a note that is
//! missing and a note that belongs to someone else both come back as
//! [`AppError::NotFound`].

use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use stickynotes_core::forms::FieldErrors;
use stickynotes_core::notes::{validate_note_form, NoteForm};
use stickynotes_core::types::DbId;
use stickynotes_db::models::note::{CreateNote, Note, UpdateNote};
use stickynotes_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::notes::{self as pages, NoteFormMode};

// ---------------------------------------------------------------------------
// Path extraction
// ---------------------------------------------------------------------------

/// The `{id}` segment of a note URL.
///
/// Only plain decimal digits name a note. Anything else (signs, letters, a
/// value that overflows) is rejected with the same 404 as a missing note.
#[derive(Debug, Clone, Copy)]
pub struct NoteId(pub DbId);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse_note_id(&raw).map(NoteId).ok_or(AppError::NotFound)
    }
}

fn parse_note_id(raw: &str) -> Option<DbId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Resolve a note through the ownership gate.
async fn owned_note(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Note> {
    NoteRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::NotFound)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// The signed-in user's notes, newest first.
pub async fn list_notes(auth: AuthUser, State(state): State<AppState>) -> AppResult<Html<String>> {
    let notes = NoteRepo::list_by_author(&state.pool, auth.user_id).await?;
    Ok(Html(pages::list_page(&auth.username, &notes)))
}

/// GET /note/{id}/
pub async fn note_detail(
    auth: AuthUser,
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> AppResult<Html<String>> {
    let note = owned_note(&state, &auth, id).await?;
    Ok(Html(pages::detail_page(&auth.username, &note)))
}

/// GET /note/create/
pub async fn create_form(auth: AuthUser) -> Html<String> {
    Html(pages::form_page(
        &auth.username,
        NoteFormMode::Create,
        &NoteForm::default(),
        &FieldErrors::new(),
    ))
}

/// POST /note/create/
///
/// The author is always the session user; an `author` field in the body is
/// ignored.
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<NoteForm>,
) -> AppResult<Response> {
    let input = match validate_note_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(user_id = auth.user_id, "Note form rejected");
            return Ok(Html(pages::form_page(
                &auth.username,
                NoteFormMode::Create,
                &form,
                &errors,
            ))
            .into_response());
        }
    };

    let note = NoteRepo::create(&state.pool, auth.user_id, &CreateNote::from(input)).await?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note created");

    Ok(Redirect::to("/").into_response())
}

/// GET /note/{id}/update/
pub async fn edit_form(
    auth: AuthUser,
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> AppResult<Html<String>> {
    let note = owned_note(&state, &auth, id).await?;
    let form = NoteForm::with_values(&note.title, &note.body);
    Ok(Html(pages::form_page(
        &auth.username,
        NoteFormMode::Edit { note_id: note.id },
        &form,
        &FieldErrors::new(),
    )))
}

/// POST /note/{id}/update/
///
/// The gate runs before the body is looked at, so a foreign note is a 404
/// even when the submitted form is invalid or not form-encoded at all.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    NoteId(id): NoteId,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    let note = owned_note(&state, &auth, id).await?;

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(
                user_id = auth.user_id,
                note_id = note.id,
                error = %rejection,
                "Unreadable note form"
            );
            return Ok(rejection.into_response());
        }
    };

    let input = match validate_note_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(user_id = auth.user_id, note_id = note.id, "Note form rejected");
            return Ok(Html(pages::form_page(
                &auth.username,
                NoteFormMode::Edit { note_id: note.id },
                &form,
                &errors,
            ))
            .into_response());
        }
    };

    let updated = NoteRepo::update_owned(&state.pool, id, auth.user_id, &UpdateNote::from(input))
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = auth.user_id, note_id = updated.id, "Note updated");

    Ok(Redirect::to(&format!("/note/{}/", updated.id)).into_response())
}

/// GET /note/{id}/delete/
///
/// Confirmation page only; nothing is deleted until the form is posted.
pub async fn delete_confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> AppResult<Html<String>> {
    let note = owned_note(&state, &auth, id).await?;
    Ok(Html(pages::delete_confirm_page(&auth.username, &note)))
}

/// POST /note/{id}/delete/
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> AppResult<Redirect> {
    if !NoteRepo::delete_owned(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_ids_are_plain_digits() {
        assert_eq!(parse_note_id("42"), Some(42));
        assert_eq!(parse_note_id("007"), Some(7));
        assert_eq!(parse_note_id(""), None);
        assert_eq!(parse_note_id("abc"), None);
        assert_eq!(parse_note_id("+5"), None);
        assert_eq!(parse_note_id("-5"), None);
        assert_eq!(parse_note_id("1.5"), None);
        assert_eq!(parse_note_id("99999999999999999999"), None);
    }
}
