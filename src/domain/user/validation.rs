//! Registration validation rules
//!
//! Each field owns an ordered rule chain that stops at the first failure.
//! Fields are independent: every field is checked even when another fails.
//! The email uniqueness lookup is a separate async phase that only runs once
//! the email's synchronous rules have passed.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use validator::ValidateEmail;

use super::repository::UserRepository;
use crate::domain::i18n::{Locale, MessageCatalog, MessageId};
use crate::domain::DomainError;

pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MAX_USERNAME_LENGTH: usize = 32;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration payload fields, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Username,
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Username, Field::Email, Field::Password];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synchronous check: passes when the predicate returns `true`
#[derive(Clone, Copy)]
pub struct Rule {
    message: MessageId,
    predicate: fn(&str) -> bool,
}

impl Rule {
    pub const fn new(message: MessageId, predicate: fn(&str) -> bool) -> Self {
        Self { message, predicate }
    }

    pub fn message(&self) -> MessageId {
        self.message
    }

    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish()
    }
}

/// Rule chain for one field. Emptiness is always checked first.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    field: Field,
    required: MessageId,
    rules: &'static [Rule],
}

impl FieldRules {
    pub const fn new(field: Field, required: MessageId, rules: &'static [Rule]) -> Self {
        Self {
            field,
            required,
            rules,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// First failing rule for the value, if any
    pub fn first_failure(&self, value: Option<&str>) -> Option<MessageId> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Some(self.required),
        };

        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(Rule::message)
    }
}

const USERNAME_RULES: &[Rule] = &[Rule::new(MessageId::UsernameLength, is_valid_username_length)];

const EMAIL_RULES: &[Rule] = &[Rule::new(MessageId::EmailFormat, is_valid_email)];

const PASSWORD_RULES: &[Rule] = &[
    Rule::new(MessageId::PasswordLength, is_valid_password_length),
    Rule::new(MessageId::PasswordPattern, has_required_character_classes),
];

pub fn is_valid_username_length(username: &str) -> bool {
    (MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username.chars().count())
}

/// RFC 5322-style address whose domain ends in a top-level label
/// (`user@mail` is rejected even though it is technically deliverable).
/// An unquoted local part must be a dot-atom: no leading, trailing or doubled dots.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let quoted = local.len() >= 2 && local.starts_with('"') && local.ends_with('"');
    if !quoted && local.split('.').any(str::is_empty) {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((_, tld)) => {
            tld.starts_with("xn--")
                || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
        }
        None => false,
    }
}

pub fn is_valid_password_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// At least one lowercase letter, one uppercase letter and one digit
pub fn has_required_character_classes(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Raw values submitted for registration
#[derive(Debug, Clone, Copy, Default)]
pub struct Candidate<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn get(&self, field: Field) -> Option<&'a str> {
        match field {
            Field::Username => self.username,
            Field::Email => self.email,
            Field::Password => self.password,
        }
    }
}

/// Validator for registration candidates
#[derive(Debug, Clone)]
pub struct UserValidator {
    fields: [FieldRules; 3],
}

impl Default for UserValidator {
    fn default() -> Self {
        Self {
            fields: [
                FieldRules::new(Field::Username, MessageId::UsernameNull, USERNAME_RULES),
                FieldRules::new(Field::Email, MessageId::EmailNull, EMAIL_RULES),
                FieldRules::new(Field::Password, MessageId::PasswordNull, PASSWORD_RULES),
            ],
        }
    }
}

impl UserValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the synchronous rule chains only
    pub fn check(&self, candidate: &Candidate<'_>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for rules in &self.fields {
            if let Some(message) = rules.first_failure(candidate.get(rules.field())) {
                errors.push(rules.field(), message);
            }
        }

        errors
    }

    /// Run every rule, including the email uniqueness lookup
    pub async fn validate(
        &self,
        candidate: &Candidate<'_>,
        repository: &dyn UserRepository,
    ) -> Result<ValidationErrors, DomainError> {
        let mut errors = self.check(candidate);

        if errors.get(Field::Email).is_none() {
            if let Some(email) = candidate.email {
                if repository.find_by_email(email).await?.is_some() {
                    errors.push(Field::Email, MessageId::EmailInuse);
                }
            }
        }

        Ok(errors)
    }
}

/// A failed field and the id of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: MessageId,
}

/// Per-field validation failures, at most one per field, kept in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, message: MessageId) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Record a failure; the first failure for a field wins
    pub fn push(&mut self, field: Field, message: MessageId) {
        if self.get(field).is_some() {
            return;
        }

        let position = self.errors.partition_point(|e| e.field < field);
        self.errors.insert(position, FieldError { field, message });
    }

    pub fn get(&self, field: Field) -> Option<MessageId> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Render every message in the given locale
    pub fn localize(&self, catalog: &MessageCatalog, locale: Locale) -> LocalizedErrors {
        LocalizedErrors {
            entries: self
                .errors
                .iter()
                .map(|e| (e.field, catalog.resolve(e.message, locale).to_string()))
                .collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();

        write!(f, "{}", parts.join(", "))
    }
}

/// Field -> localized message, serialized as a JSON object in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedErrors {
    entries: Vec<(Field, String)>,
}

impl LocalizedErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }
}

impl Serialize for LocalizedErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;

        for (field, message) in &self.entries {
            map.serialize_entry(field.as_str(), message)?;
        }

        map.end()
    }
}
