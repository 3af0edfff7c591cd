use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Valid email is required";

/// A directory member. `id` is assigned by the store and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id, name: name.into(), email: email.into() }
    }
}

/// Body of `POST /users`. Missing fields deserialize as empty so that
/// validation, not the JSON parser, reports them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if self.email.is_empty() {
            return Err(ModelError::validation(EMAIL_REQUIRED));
        }
        validate_email(&self.email)
    }
}

/// Body of `PUT /users/{id}`. An empty string is treated exactly like an
/// absent field, so a stored value can never be cleared through an update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self.email() {
            Some(email) => validate_email(email),
            None => Ok(()),
        }
    }

    /// Overwrite the provided non-empty fields of `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = self.name() {
            user.name = name.to_string();
        }
        if let Some(email) = self.email() {
            user.email = email.to_string();
        }
    }
}

/// Same emptiness rule as `UpdateUserRequest::name`: whitespace counts as a name.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::validation(NAME_REQUIRED));
    }
    Ok(())
}

/// Syntactic check only: `local@domain.tld`, no whitespace, one `@`,
/// domain labels non-empty.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::validation(EMAIL_INVALID);
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    let label_ok = |l: &&str| {
        !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    if !labels.iter().all(label_ok) {
        return Err(invalid());
    }
    Ok(())
}
