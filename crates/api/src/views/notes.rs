//! Note pages: list, detail, create/edit form and delete confirmation.

use stickynotes_core::forms::FieldErrors;
use stickynotes_core::notes::{NoteForm, MAX_TITLE_LENGTH};
use stickynotes_db::models::note::Note;

use super::{escape, input_field, layout, non_field_errors, textarea_field};

/// Heading of the note board.
pub const LIST_TITLE: &str = "My Sticky Notes";

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %H:%M";

pub fn list_page(username: &str, notes: &[Note]) -> String {
    let body = if notes.is_empty() {
        r#"<p class="empty">You have no notes yet.</p>"#.to_string()
    } else {
        let items: String = notes
            .iter()
            .map(|note| {
                format!(
                    r#"  <li class="note"><a href="/note/{id}/">{title}</a> <time>{created}</time></li>
"#,
                    id = note.id,
                    title = escape(&note.title),
                    created = note.created_at.format(TIMESTAMP_FORMAT),
                )
            })
            .collect();
        format!("<ul class=\"notes\">\n{items}</ul>")
    };

    let content = format!(
        r#"<h1>{heading}</h1>
<p><a href="/note/create/" class="button">New note</a></p>
{body}"#,
        heading = escape(LIST_TITLE),
    );
    layout(LIST_TITLE, Some(username), &content)
}

pub fn detail_page(username: &str, note: &Note) -> String {
    let content = format!(
        r#"<article class="note">
  <h1>{title}</h1>
  <p class="meta">Created <time>{created}</time></p>
  <div class="body" style="white-space: pre-wrap">{body}</div>
</article>
<p>
  <a href="/note/{id}/update/">Edit</a>
  <a href="/note/{id}/delete/">Delete</a>
  <a href="/">Back to notes</a>
</p>"#,
        id = note.id,
        title = escape(&note.title),
        body = escape(&note.body),
        created = note.created_at.format(TIMESTAMP_FORMAT),
    );
    layout(&note.title, Some(username), &content)
}

/// Which note form is being shown.
#[derive(Debug, Clone, Copy)]
pub enum NoteFormMode {
    Create,
    Edit { note_id: i64 },
}

impl NoteFormMode {
    fn heading(self) -> &'static str {
        match self {
            NoteFormMode::Create => "New Note",
            NoteFormMode::Edit { .. } => "Edit Note",
        }
    }

    fn action(self) -> String {
        match self {
            NoteFormMode::Create => "/note/create/".to_string(),
            NoteFormMode::Edit { note_id } => format!("/note/{note_id}/update/"),
        }
    }

    fn cancel_href(self) -> String {
        match self {
            NoteFormMode::Create => "/".to_string(),
            NoteFormMode::Edit { note_id } => format!("/note/{note_id}/"),
        }
    }
}

pub fn form_page(username: &str, mode: NoteFormMode, form: &NoteForm, errors: &FieldErrors) -> String {
    let maxlength = format!(r#" maxlength="{MAX_TITLE_LENGTH}" required"#);
    let content = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
{non_field}{title}
{body}
  <button type="submit">Save</button>
  <a href="{cancel}">Cancel</a>
</form>"#,
        heading = mode.heading(),
        action = mode.action(),
        cancel = mode.cancel_href(),
        non_field = non_field_errors(errors),
        title = input_field("title", "Title", "text", &form.title, errors, &maxlength),
        body = textarea_field("body", "Body", &form.body, errors),
    );
    layout(mode.heading(), Some(username), &content)
}

pub fn delete_confirm_page(username: &str, note: &Note) -> String {
    let content = format!(
        r#"<h1>Delete note</h1>
<p>Are you sure you want to delete "{title}"? This cannot be undone.</p>
<form method="post" action="/note/{id}/delete/">
  <button type="submit">Confirm delete</button>
  <a href="/note/{id}/">Cancel</a>
</form>"#,
        id = note.id,
        title = escape(&note.title),
    );
    layout("Delete note", Some(username), &content)
}
