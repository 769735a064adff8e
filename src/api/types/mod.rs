//! Request and response types shared by the HTTP handlers

pub mod error;
pub mod json;
pub mod locale;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use locale::RequestLocale;
