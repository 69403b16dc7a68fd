//! Route definitions for the note pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes. Every one of them requires a session.
///
/// ```text
/// GET  /                    -> list_notes
/// GET  /note/create/        -> create_form
/// POST /note/create/        -> create_note
/// GET  /note/{id}/          -> note_detail
/// GET  /note/{id}/update/   -> edit_form
/// POST /note/{id}/update/   -> update_note
/// GET  /note/{id}/delete/   -> delete_confirm
/// POST /note/{id}/delete/   -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes))
        .route(
            "/note/create/",
            get(notes::create_form).post(notes::create_note),
        )
        .route("/note/{id}/", get(notes::note_detail))
        .route(
            "/note/{id}/update/",
            get(notes::edit_form).post(notes::update_note),
        )
        .route(
            "/note/{id}/delete/",
            get(notes::delete_confirm).post(notes::delete_note),
        )
}
