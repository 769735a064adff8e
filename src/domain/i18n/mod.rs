//! Internationalization
//!
//! Locale negotiation and the process-wide message catalog used to render
//! validation errors.

mod catalog;
mod locale;

pub use catalog::{MessageCatalog, MessageId};
pub use locale::Locale;
