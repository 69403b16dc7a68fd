//! Registration and login forms, plus the password policy applied at sign-up.
//!
//! Only checks that need no database live here. Username uniqueness is
//! verified by the registration handler and merged into the same
//! [`FieldErrors`].

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::forms::{FieldErrors, REQUIRED_MESSAGE};

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LENGTH: u64 = 150;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Passwords rejected outright regardless of length.
///
/// A short list of the most common passwords that meet the length rule, not
/// a full breach corpus. Compared case-insensitively.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "12345678",
    "123456789",
    "1234567890",
    "qwertyuiop",
    "qwerty123",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "welcome1",
    "letmein1",
    "trustno1",
    "superman",
    "abc12345",
    "11111111",
    "00000000",
    "changeme",
];

/// Raw sign-up form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegistrationForm {
    #[serde(default)]
    #[validate(
        length(max = MAX_USERNAME_LENGTH, message = "Ensure this value has at most 150 characters."),
        custom(function = "validate_username_chars")
    )]
    pub username: String,

    #[serde(default)]
    pub password1: String,

    #[serde(default)]
    pub password2: String,
}

/// A sign-up form that passed every check except uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// Raw login form. `next` carries the page to return to after signing in.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub next: Option<String>,
}

/// Credentials from a login form that has both inputs filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    let ok = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_username");
        err.message = Some(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        );
        Err(err)
    }
}

/// Validate a sign-up form.
///
/// Passwords are compared verbatim; only the username is trimmed.
pub fn validate_registration(form: &RegistrationForm) -> Result<NewAccount, FieldErrors> {
    let cleaned = RegistrationForm {
        username: form.username.trim().to_string(),
        password1: form.password1.clone(),
        password2: form.password2.clone(),
    };

    let mut errors = FieldErrors::new();

    if cleaned.username.is_empty() {
        errors.add("username", REQUIRED_MESSAGE);
    } else if let Err(e) = cleaned.validate() {
        errors.merge(FieldErrors::from(e));
    }

    if cleaned.password1.is_empty() {
        errors.add("password1", REQUIRED_MESSAGE);
    }
    if cleaned.password2.is_empty() {
        errors.add("password2", REQUIRED_MESSAGE);
    }

    if !cleaned.password1.is_empty() && !cleaned.password2.is_empty() {
        if cleaned.password1 != cleaned.password2 {
            errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
        } else {
            for message in password_policy_violations(&cleaned.password2, &cleaned.username) {
                errors.add("password2", message);
            }
        }
    }

    errors.into_result(NewAccount {
        username: cleaned.username,
        password: cleaned.password1,
    })
}

/// Check a login form for blank inputs.
pub fn validate_login(form: &LoginForm) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    let username = form.username.trim().to_string();
    if username.is_empty() {
        errors.add("username", REQUIRED_MESSAGE);
    }
    if form.password.is_empty() {
        errors.add("password", REQUIRED_MESSAGE);
    }
    errors.into_result(Credentials {
        username,
        password: form.password.clone(),
    })
}

/// Every policy rule `password` breaks, as user-facing messages.
pub fn password_policy_violations(password: &str, username: &str) -> Vec<String> {
    let mut out = Vec::new();

    if is_too_similar(password, username) {
        out.push("The password is too similar to the username.".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        out.push(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        out.push("This password is too common.".to_string());
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        out.push("This password is entirely numeric.".to_string());
    }

    out
}

/// Case-insensitive containment in either direction, ignoring usernames
/// shorter than three characters.
fn is_too_similar(password: &str, username: &str) -> bool {
    let username = username.to_lowercase();
    if username.chars().count() < 3 {
        return false;
    }
    let password = password.to_lowercase();
    password.contains(&username) || username.contains(&password)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn registration(username: &str, p1: &str, p2: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            password1: p1.to_string(),
            password2: p2.to_string(),
        }
    }

    #[test]
    fn accepts_strong_matching_passwords() {
        let account =
            validate_registration(&registration("newuser", "SecurePass123!", "SecurePass123!"))
                .unwrap();
        assert_eq!(account.username, "newuser");
        assert_eq!(account.password, "SecurePass123!");
    }

    #[test]
    fn rejects_mismatched_passwords() {
        let errors =
            validate_registration(&registration("newuser", "SecurePass123!", "SecurePass124!"))
                .unwrap_err();
        assert_eq!(errors.get("password2"), [PASSWORD_MISMATCH_MESSAGE]);
    }

    #[test]
    fn rejects_weak_passwords() {
        let errors = validate_registration(&registration("bob", "1234", "1234")).unwrap_err();
        let messages = errors.get("password2");
        assert!(messages.iter().any(|m| m.contains("too short")));
        assert!(messages.iter().any(|m| m.contains("entirely numeric")));

        let errors =
            validate_registration(&registration("carol", "password123", "password123"))
                .unwrap_err();
        assert!(errors.get("password2").iter().any(|m| m.contains("too common")));
    }

    #[test]
    fn common_password_check_ignores_case() {
        let violations = password_policy_violations("PassWord123", "dave");
        assert_eq!(violations, ["This password is too common."]);
    }

    #[test]
    fn rejects_password_close_to_username() {
        let violations = password_policy_violations("Marianne2024", "marianne");
        assert_eq!(violations, ["The password is too similar to the username."]);
    }

    #[test]
    fn rejects_bad_username_characters() {
        let errors =
            validate_registration(&registration("no spaces!", "SecurePass123!", "SecurePass123!"))
                .unwrap_err();
        assert!(errors.get("username")[0].starts_with("Enter a valid username"));
    }

    #[test]
    fn requires_every_field() {
        let errors = validate_registration(&RegistrationForm::default()).unwrap_err();
        assert!(errors.has("username"));
        assert!(errors.has("password1"));
        assert!(errors.has("password2"));
    }

    #[test]
    fn login_requires_both_inputs() {
        let form = LoginForm {
            username: " testuser ".into(),
            password: String::new(),
            next: None,
        };
        let errors = validate_login(&form).unwrap_err();
        assert!(errors.has("password"));
        assert!(!errors.has("username"));

        let form = LoginForm {
            password: "pw".into(),
            ..form
        };
        assert_matches!(validate_login(&form), Ok(c) if c.username == "testuser");
    }
}
