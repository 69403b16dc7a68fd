//! Login and registration pages.

use stickynotes_core::accounts::{LoginForm, RegistrationForm, MIN_PASSWORD_LENGTH};
use stickynotes_core::forms::FieldErrors;

use super::{escape, input_field, layout, non_field_errors};

pub fn login_page(form: &LoginForm, errors: &FieldErrors) -> String {
    let next = match form.next.as_deref() {
        Some(next) if !next.is_empty() => format!(
            r#"  <input type="hidden" name="next" value="{}">
"#,
            escape(next)
        ),
        _ => String::new(),
    };

    let content = format!(
        r#"<h1>Log in</h1>
<form method="post" action="/login/">
{non_field}{username}
{password}
{next}  <button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register/">Register</a></p>"#,
        non_field = non_field_errors(errors),
        username = input_field(
            "username",
            "Username",
            "text",
            &form.username,
            errors,
            r#" maxlength="150" autocomplete="username" autofocus required"#,
        ),
        // The password is never echoed back.
        password = input_field(
            "password",
            "Password",
            "password",
            "",
            errors,
            r#" autocomplete="current-password" required"#,
        ),
    );
    layout("Log in", None, &content)
}

pub fn register_page(form: &RegistrationForm, errors: &FieldErrors) -> String {
    let help = format!(
        r#"<ul class="helptext">
  <li>Your password can't be too similar to your username.</li>
  <li>Your password must contain at least {MIN_PASSWORD_LENGTH} characters.</li>
  <li>Your password can't be a commonly used password.</li>
  <li>Your password can't be entirely numeric.</li>
</ul>"#
    );

    let content = format!(
        r#"<h1>Register</h1>
<form method="post" action="/register/">
{non_field}{username}
<p class="helptext">Required. 150 characters or fewer. Letters, digits and @/./+/-/_ only.</p>
{password1}
{help}
{password2}
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login/">Log in</a></p>"#,
        non_field = non_field_errors(errors),
        username = input_field(
            "username",
            "Username",
            "text",
            &form.username,
            errors,
            r#" maxlength="150" autocomplete="username" autofocus required"#,
        ),
        password1 = input_field(
            "password1",
            "Password",
            "password",
            "",
            errors,
            r#" autocomplete="new-password" required"#,
        ),
        password2 = input_field(
            "password2",
            "Password confirmation",
            "password",
            "",
            errors,
            r#" autocomplete="new-password" required"#,
        ),
    );
    layout("Register", None, &content)
}
