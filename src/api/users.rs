//! User registration endpoint

use axum::extract::{FromRequest, Request, State};
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::json::JsonRejection;
use crate::api::types::{ApiError, Json, RequestLocale};
use crate::infrastructure::user::{RegisterUserRequest, RegistrationError};

const USER_CREATED_MESSAGE: &str = "User created!";

/// Registration payload.
///
/// Every shape of body reaches the validator: a non-JSON content type or a
/// non-object body carries no fields, `null`/arrays/objects count as missing,
/// and numbers or booleans are checked as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterUserBody {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterUserBody {
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(field_text);

        Self {
            username: field("username"),
            email: field("email"),
            password: field("password"),
        }
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S> FromRequest<S> for RegisterUserBody
where
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            debug!("Registration body is not JSON, treating every field as missing");
            return Ok(Self::default());
        }

        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Self::from_value(&value))
    }
}

impl From<RegisterUserBody> for RegisterUserRequest {
    fn from(body: RegisterUserBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

pub fn create_users_router() -> Router<AppState> {
    Router::new().route("/users", post(register_user))
}

/// POST /api/1.0/users
pub async fn register_user(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    body: RegisterUserBody,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    debug!(%locale, "Registering user");

    match state.user_service.register(body.into()).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: USER_CREATED_MESSAGE.to_string(),
            }),
        )),
        Err(RegistrationError::Invalid(errors)) => {
            Err(ApiError::validation(errors.localize(&state.catalog, locale)))
        }
        Err(RegistrationError::Domain(e)) => Err(e.into()),
    }
}
