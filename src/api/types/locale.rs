//! Request locale extractor

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header::ACCEPT_LANGUAGE, request::Parts};

use crate::api::state::AppState;
use crate::domain::Locale;

/// Locale negotiated from `Accept-Language`, falling back to the configured default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

impl RequestLocale {
    pub fn resolve(header: Option<&str>, default: Locale) -> Self {
        Self(header.and_then(Locale::negotiate).unwrap_or(default))
    }
}

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Self::resolve(header, state.default_locale))
    }
}
