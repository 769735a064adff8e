//! Static message catalog keyed by message id and locale

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::locale::Locale;
use crate::domain::DomainError;

/// Stable identifiers for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    UsernameNull,
    UsernameLength,
    EmailNull,
    EmailFormat,
    EmailInuse,
    PasswordNull,
    PasswordLength,
    PasswordPattern,
}

impl MessageId {
    pub const ALL: [MessageId; 8] = [
        MessageId::UsernameNull,
        MessageId::UsernameLength,
        MessageId::EmailNull,
        MessageId::EmailFormat,
        MessageId::EmailInuse,
        MessageId::PasswordNull,
        MessageId::PasswordLength,
        MessageId::PasswordPattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsernameNull => "username_null",
            Self::UsernameLength => "username_length",
            Self::EmailNull => "email_null",
            Self::EmailFormat => "email_format",
            Self::EmailInuse => "email_inuse",
            Self::PasswordNull => "password_null",
            Self::PasswordLength => "password_length",
            Self::PasswordPattern => "password_pattern",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EMBEDDED_CATALOGS: [(Locale, &str); 2] = [
    (Locale::En, include_str!("../../../locales/en.json")),
    (Locale::Tr, include_str!("../../../locales/tr.json")),
];

/// Immutable translations for every supported locale.
///
/// Built once at startup and shared behind an `Arc`; every locale is
/// guaranteed to carry every [`MessageId`].
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<Locale, HashMap<MessageId, String>>,
}

impl MessageCatalog {
    /// Load the catalogs compiled into the binary
    pub fn embedded() -> Result<Self, DomainError> {
        Self::from_sources(EMBEDDED_CATALOGS)
    }

    /// Parse one JSON object per locale and check completeness
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (Locale, &'a str)>,
    ) -> Result<Self, DomainError> {
        let mut messages = HashMap::new();

        for (locale, source) in sources {
            let table: HashMap<MessageId, String> =
                serde_json::from_str(source).map_err(|e| {
                    DomainError::configuration(format!(
                        "Invalid message catalog for locale '{}': {}",
                        locale, e
                    ))
                })?;

            if let Some(missing) = MessageId::ALL.iter().find(|id| !table.contains_key(*id)) {
                return Err(DomainError::configuration(format!(
                    "Message catalog for locale '{}' is missing '{}'",
                    locale, missing
                )));
            }

            messages.insert(locale, table);
        }

        if let Some(missing) = Locale::ALL.iter().find(|l| !messages.contains_key(*l)) {
            return Err(DomainError::configuration(format!(
                "No message catalog for locale '{}'",
                missing
            )));
        }

        Ok(Self { messages })
    }

    /// Resolve a message for the given locale
    pub fn resolve(&self, id: MessageId, locale: Locale) -> &str {
        self.messages
            .get(&locale)
            .and_then(|table| table.get(&id))
            .map(String::as_str)
            // unreachable after construction
            .unwrap_or_else(|| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = MessageCatalog::embedded().unwrap();

        assert_eq!(
            catalog.resolve(MessageId::UsernameNull, Locale::En),
            "Username cannot be null"
        );
        assert_eq!(
            catalog.resolve(MessageId::EmailInuse, Locale::Tr),
            "E-posta zaten kullanılıyor"
        );
    }

    #[test]
    fn test_every_message_differs_between_locales() {
        let catalog = MessageCatalog::embedded().unwrap();

        for id in MessageId::ALL {
            assert_ne!(
                catalog.resolve(id, Locale::En),
                catalog.resolve(id, Locale::Tr),
                "{} is not translated",
                id
            );
        }
    }

    #[test]
    fn test_missing_message_rejected() {
        let result = MessageCatalog::from_sources([
            (Locale::En, r#"{"username_null": "x"}"#),
            (Locale::Tr, include_str!("../../../locales/tr.json")),
        ]);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_missing_locale_rejected() {
        let result =
            MessageCatalog::from_sources([(Locale::En, include_str!("../../../locales/en.json"))]);

        assert!(result.unwrap_err().to_string().contains("'tr'"));
    }

    #[test]
    fn test_unknown_message_id_rejected() {
        let result = MessageCatalog::from_sources([(Locale::En, r#"{"nope": "x"}"#)]);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_message_id_serialization() {
        assert_eq!(
            serde_json::to_string(&MessageId::EmailInuse).unwrap(),
            "\"email_inuse\""
        );
        assert_eq!(MessageId::PasswordPattern.as_str(), "password_pattern");
    }
}
