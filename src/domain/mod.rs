//! Domain layer - Core business logic and entities

pub mod error;
pub mod i18n;
pub mod user;

pub use error::DomainError;
pub use i18n::{Locale, MessageCatalog, MessageId};
pub use user::{
    Candidate, Field, LocalizedErrors, User, UserId, UserRepository, UserValidator,
    ValidationErrors,
};
