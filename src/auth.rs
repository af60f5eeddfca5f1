use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    services::UsersService,
};

/// Claims
///
/// Payload of the access tokens issued by `POST /auth/login` and checked on every Bearer-guarded
/// request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the id of the user the token was issued to.
    pub sub: Uuid,
    /// Expiration Time (exp): seconds since the epoch after which the token is rejected.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
}

/// issue_token
///
/// Signs an HS256 access token for `user_id`, valid for `ttl_secs`.
pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// AuthUser Extractor Result
///
/// The resolved identity of a Bearer-authenticated request. Comment authorship (`userId`,
/// `userLogin`) is taken from here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub login: String,
    pub email: String,
}

/// AuthUser Extractor Implementation
///
/// Usable as a handler argument on any Bearer-guarded route, and as the argument of the bearer
/// middleware in `lib.rs`. The steps are:
/// 1. Resolved Identity: if the bearer middleware already authenticated the request, its
///    `AuthUser` is taken from the request extensions and nothing is decoded again.
/// 2. Local Bypass: only in `Env::Local` with `dev_auth_bypass` on, an `x-user-id` header naming
///    an existing user is accepted.
/// 3. Token Validation: `Authorization: Bearer <jwt>`, signature and expiry checked.
/// 4. User Lookup: the subject must still exist, so deleting a user revokes their tokens.
///
/// Rejection: `401 Unauthorized` on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    UsersService: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(resolved) = parts.extensions.get::<AuthUser>() {
            return Ok(resolved.clone());
        }

        let users = UsersService::from_ref(state);
        let config = AppConfig::from_ref(state);

        if config.env == Env::Local && config.dev_auth_bypass {
            let bypass_id = parts
                .headers
                .get("x-user-id")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| Uuid::parse_str(value).ok());
            if let Some(user_id) = bypass_id {
                if let Ok(Some(user)) = users.find(user_id).await {
                    return Ok(AuthUser {
                        id: user.id,
                        login: user.login,
                        email: user.email,
                    });
                }
            }
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => warn!("expired access token"),
                _ => warn!(error = %e, "invalid access token"),
            }
            StatusCode::UNAUTHORIZED
        })?;

        let user = users
            .find(token_data.claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed during authentication");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: user.id,
            login: user.login,
            email: user.email,
        })
    }
}

/// AdminGuard
///
/// Marker proving the request carried the configured admin credentials as HTTP Basic auth.
/// Guards every blogger/post mutation and user administration.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl<S> FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let encoded = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Basic "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        match decoded.split_once(':') {
            Some((login, password))
                if login == config.admin_login && password == config.admin_password =>
            {
                Ok(AdminGuard)
            }
            _ => {
                warn!("rejected admin credentials");
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}

/// Value of an `Authorization` header carrying Basic credentials.
pub fn basic_auth_header(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}
