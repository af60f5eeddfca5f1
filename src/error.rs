use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

// --- Wire Format ---

/// FieldError
///
/// A single entry of the structured client-error payload: which input field was rejected
/// and a human readable reason. An empty `field` means the failure is not tied to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// ErrorsBody
///
/// Body of every 400 (and 500) response: `{"errorsMessages": [{"field", "message"}, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ErrorsBody {
    pub errors_messages: Vec<FieldError>,
}

// --- Repository Layer ---

/// RepoError
///
/// Failures raised by a persistence backend. The in-memory backend only ever produces
/// `Duplicate`; the Postgres backend wraps driver errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated on {0}")]
    Duplicate(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

// --- Service Layer ---

/// ServiceError
///
/// Business outcomes of a service call that are not a success. The HTTP mapping lives in
/// `ApiError`, so services stay independent of the transport.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed entity of a read does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    /// The addressed entity of an update or delete does not exist.
    #[error("{entity} {id} does not exist")]
    TargetMissing { entity: &'static str, id: Uuid },
    /// An entity referenced by the request (blogger of a post, post of a comment) does not exist.
    #[error("{message}")]
    ReferenceMissing { field: &'static str, message: String },
    #[error("{field} is already taken")]
    Duplicate { field: &'static str },
    #[error("invalid login or password")]
    InvalidCredentials,
    #[error("user {user_id} is not the author of comment {comment_id}")]
    NotAuthor { comment_id: Uuid, user_id: Uuid },
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error(transparent)]
    Repository(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

// --- Startup ---

/// Failures while bringing the server up. Returned from `main`.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to connect to Postgres: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to bind or serve: {0}")]
    Io(#[from] std::io::Error),
}

// --- HTTP Layer ---

/// ApiError
///
/// The only error type handlers return. Converts every lower-level failure into a status code
/// and, for client errors, the `ErrorsBody` payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest(Vec<FieldError>),
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest(vec![FieldError::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The structured entries carried by a 400, empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::BadRequest(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { .. } => ApiError::NotFound,
            ServiceError::TargetMissing { entity, id } => {
                ApiError::bad_request("id", format!("{entity} {id} doesn't exist"))
            }
            ServiceError::ReferenceMissing { field, message } => ApiError::bad_request(field, message),
            ServiceError::Duplicate { field } => {
                ApiError::bad_request(field, format!("{field} is already taken"))
            }
            ServiceError::InvalidCredentials => ApiError::Unauthorized,
            ServiceError::NotAuthor { .. } => ApiError::Forbidden,
            ServiceError::Hash(_) | ServiceError::Token(_) | ServiceError::Repository(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut entries: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = camel_case(&field);
                field_errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", e.code));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();
        entries.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::BadRequest(entries)
    }
}

// Validator reports Rust field names; clients know the camelCase JSON names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(errors_messages) => {
                (status, Json(ErrorsBody { errors_messages })).into_response()
            }
            ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "request failed");
                let body = ErrorsBody {
                    errors_messages: vec![FieldError::new("", "internal error")],
                };
                (status, Json(body)).into_response()
            }
            _ => status.into_response(),
        }
    }
}
