//! Server-rendered HTML.
//!
//! Pages are small enough to build with `format!`. Every piece of user or
//! database text goes through [`escape`] before it reaches the markup.

pub mod accounts;
pub mod errors;
pub mod notes;

use stickynotes_core::forms::FieldErrors;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the site layout.
///
/// `user` is the signed-in username, which switches the header between the
/// logout button and the login/register links.
pub fn layout(title: &str, user: Option<&str>, content: &str) -> String {
    let nav = match user {
        Some(username) => format!(
            r#"<span class="user">Signed in as {}</span>
      <form method="post" action="/logout/" class="inline"><button type="submit">Log out</button></form>"#,
            escape(username)
        ),
        None => r#"<a href="/login/">Log in</a> <a href="/register/">Register</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Sticky Notes</title>
  </head>
  <body>
    <header>
      <a href="/" class="brand">Sticky Notes</a>
      <nav>{nav}</nav>
    </header>
    <main>
{content}
    </main>
  </body>
</html>
"#,
        title = escape(title),
    )
}

/// Render a list of error messages, or nothing when there are none.
pub(crate) fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

/// Errors that belong to the form as a whole.
pub(crate) fn non_field_errors(errors: &FieldErrors) -> String {
    if errors.non_field().is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="errorlist nonfield">{}</div>"#,
        error_list(errors.non_field())
    )
}

/// A labelled `<input>` with its field errors.
pub(crate) fn input_field(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    errors: &FieldErrors,
    extra_attrs: &str,
) -> String {
    format!(
        r#"<p>
  <label for="id_{name}">{label}</label>
  {errors}<input type="{input_type}" name="{name}" id="id_{name}" value="{value}"{extra_attrs}>
</p>"#,
        errors = error_list(errors.get(name)),
        label = escape(label),
        value = escape(value),
    )
}

/// A labelled `<textarea>` with its field errors.
pub(crate) fn textarea_field(name: &str, label: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<p>
  <label for="id_{name}">{label}</label>
  {errors}<textarea name="{name}" id="id_{name}" rows="10" cols="40" required>{value}</textarea>
</p>"#,
        errors = error_list(errors.get(name)),
        label = escape(label),
        value = escape(value),
    )
}
