use crate::{
    auth::issue_token,
    error::{RepoError, ServiceError, ServiceResult},
    models::{LoginInput, LoginSuccess, MeView, User, UserInput, UserView},
    repository::UsersRepository,
};
use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Signing material for access tokens, lifted out of `AppConfig`.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub ttl_secs: u64,
}

/// UsersService
///
/// Account management and credential checks. Passwords are hashed with Argon2 (default
/// parameters) before they reach the repository.
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    tokens: TokenSettings,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>, tokens: TokenSettings) -> Self {
        Self { repo, tokens }
    }

    pub async fn list(&self) -> ServiceResult<Vec<UserView>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// Raw record lookup, used by the Bearer guard.
    pub async fn find(&self, id: Uuid) -> ServiceResult<Option<User>> {
        Ok(self.repo.find(id).await?)
    }

    pub async fn me(&self, id: Uuid) -> ServiceResult<MeView> {
        let user = self
            .repo
            .find(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: "user", id })?;
        Ok(MeView {
            user_id: user.id,
            login: user.login,
            email: user.email,
        })
    }

    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn create(&self, input: UserInput) -> ServiceResult<UserView> {
        if self.repo.find_by_login(&input.login).await?.is_some() {
            return Err(ServiceError::Duplicate { field: "login" });
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Duplicate { field: "email" });
        }

        let user = User {
            id: Uuid::new_v4(),
            login: input.login,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            created_at: Utc::now(),
        };
        match self.repo.insert(&user).await {
            Ok(()) => {}
            Err(RepoError::Duplicate(field)) => return Err(ServiceError::Duplicate { field }),
            Err(e) => return Err(e.into()),
        }
        info!(user_id = %user.id, "user created");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::TargetMissing { entity: "user", id });
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// login
    ///
    /// Checks the credentials and issues an access token. Unknown login and wrong password are
    /// indistinguishable to the caller.
    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn login(&self, input: LoginInput) -> ServiceResult<LoginSuccess> {
        let Some(user) = self.repo.find_by_login(&input.login).await? else {
            warn!("login for unknown user");
            return Err(ServiceError::InvalidCredentials);
        };
        if !verify_password(&input.password, &user.password_hash)? {
            warn!(user_id = %user.id, "wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let access_token = issue_token(user.id, &self.tokens.secret, self.tokens.ttl_secs)
            .map_err(|e| ServiceError::Token(e.to_string()))?;
        Ok(LoginSuccess { access_token })
    }
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Hash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> ServiceResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| ServiceError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
