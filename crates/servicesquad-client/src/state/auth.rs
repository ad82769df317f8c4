use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use servicesquad_protocol::endpoints;

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Username/password pair sent to `/login` and `/signup`.
///
/// The password is sent as typed; hashing happens on the server.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which of the two authentication endpoints a form submission targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthMode::Login => endpoints::LOGIN,
            AuthMode::Signup => endpoints::SIGNUP,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Username,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Username => f.write_str("username"),
            Field::Password => f.write_str("password"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    TooShort { min: usize },
}

/// Per-field validation failures. Empty means the credentials may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(BTreeMap<Field, Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<Violation> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Violation)> + '_ {
        self.0.iter().map(|(field, violation)| (*field, *violation))
    }

    /// Human readable reason for one field, e.g. "password must be at least 8 characters"
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|violation| match violation {
            Violation::Required => format!("{} required", field),
            Violation::TooShort { min } => {
                format!("{} must be at least {} characters", field, min)
            }
        })
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .keys()
            .filter_map(|field| self.message(*field))
            .collect();
        f.write_str(&messages.join(", "))
    }
}

fn check(value: &str, min: usize) -> Option<Violation> {
    let len = value.chars().count();
    if len == 0 {
        Some(Violation::Required)
    } else if len < min {
        Some(Violation::TooShort { min })
    } else {
        None
    }
}

/// Check both fields against their minimum lengths.
pub fn validate(credentials: &Credentials) -> Violations {
    let mut violations = BTreeMap::new();

    if let Some(v) = check(&credentials.username, MIN_USERNAME_LEN) {
        violations.insert(Field::Username, v);
    }
    if let Some(v) = check(&credentials.password, MIN_PASSWORD_LEN) {
        violations.insert(Field::Password, v);
    }

    Violations(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_usernames_are_flagged() {
        for len in 1..MIN_USERNAME_LEN {
            let creds = Credentials::new("u".repeat(len), "longenough");
            let violations = validate(&creds);
            assert_eq!(
                violations.get(Field::Username),
                Some(Violation::TooShort { min: 6 }),
                "len {}",
                len
            );
            assert_eq!(violations.get(Field::Password), None);
        }
    }

    #[test]
    fn short_passwords_are_flagged() {
        for len in 1..MIN_PASSWORD_LEN {
            let creds = Credentials::new("volunteer1", "p".repeat(len));
            assert_eq!(
                validate(&creds).get(Field::Password),
                Some(Violation::TooShort { min: 8 })
            );
        }
    }

    #[test]
    fn empty_fields_are_required() {
        let violations = validate(&Credentials::default());
        assert_eq!(violations.get(Field::Username), Some(Violation::Required));
        assert_eq!(violations.get(Field::Password), Some(Violation::Required));
        assert_eq!(
            violations.to_string(),
            "username required, password required"
        );
    }

    #[test]
    fn minimum_lengths_pass() {
        assert!(validate(&Credentials::new("abcdef", "abcdefgh")).is_empty());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // six characters, twelve bytes
        let creds = Credentials::new("éééééé", "ü".repeat(7));
        let violations = validate(&creds);
        assert_eq!(violations.get(Field::Username), None);
        assert_eq!(
            violations.message(Field::Password).as_deref(),
            Some("password must be at least 8 characters")
        );
    }

    #[test]
    fn mode_matches_endpoint() {
        assert_eq!(AuthMode::Login.endpoint(), "/login");
        assert_eq!(AuthMode::Signup.endpoint(), "/signup");
        assert_eq!(AuthMode::Login.toggled().toggled(), AuthMode::Login);
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("volunteer1", "hunter2hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
