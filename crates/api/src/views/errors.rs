use axum::http::StatusCode;

use super::{escape, layout};

pub fn not_found_page() -> String {
    layout(
        "Not found",
        None,
        r#"<h1>Not found</h1>
<p>The requested page could not be found.</p>
<p><a href="/">Back to your notes</a></p>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        r#"<h1>{code} {reason}</h1>
<p>{message}</p>
<p><a href="/">Back to your notes</a></p>"#,
        code = status.as_u16(),
        message = escape(message),
    );
    layout(reason, None, &content)
}
