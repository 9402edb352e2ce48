use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum message length, counted in characters after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn next(self) -> Field {
        let idx = Field::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Field::ALL[(idx + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Field {
        let idx = Field::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Field::ALL[(idx + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("invalid")]
    Invalid,
    #[error("too short")]
    TooShort,
}

/// Failing fields, keyed in form order. Empty means the form is valid.
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Human-readable message shown under a field.
pub fn describe(field: Field, error: FieldError) -> String {
    match (field, error) {
        (_, FieldError::Required) => format!("{} is required", field.label()),
        (Field::Email, FieldError::Invalid) => "Invalid email address".to_string(),
        (_, FieldError::Invalid) => format!("Invalid {}", field.label().to_lowercase()),
        (_, FieldError::TooShort) => format!(
            "{} must be at least {MIN_MESSAGE_CHARS} characters",
            field.label()
        ),
    }
}

/// The four free-text inputs of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&f| self.get(f).is_empty())
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// Check every field and report all failures together.
pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(Field::Name, FieldError::Required);
    }

    // Email is checked untrimmed: whitespace alone is not "required" but
    // still fails the pattern.
    if fields.email.is_empty() {
        errors.insert(Field::Email, FieldError::Required);
    } else if !EMAIL_RE.is_match(&fields.email) {
        errors.insert(Field::Email, FieldError::Invalid);
    }

    if fields.subject.trim().is_empty() {
        errors.insert(Field::Subject, FieldError::Required);
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.insert(Field::Message, FieldError::Required);
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        errors.insert(Field::Message, FieldError::TooShort);
    }

    errors
}
