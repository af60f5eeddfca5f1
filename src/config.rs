use std::env;

const LOCAL_JWT_SECRET: &str = "local-dev-jwt-secret";

/// AppConfig
///
/// Holds the application's entire configuration. Immutable once loaded and shared through
/// `AppState`; the guards pull it out with `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the log format and whether the bypass may be enabled.
    pub env: Env,
    // Opt-in (`AUTH_DEV_BYPASS=true`) for the `x-user-id` header bypass. Ignored in production.
    pub dev_auth_bypass: bool,
    // Postgres connection string. `None` selects the in-memory store (local only).
    pub db_url: Option<String>,
    pub db_max_connections: u32,
    // HS256 secret used to sign and verify access tokens.
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    // Basic-auth credentials accepted by the admin guard.
    pub admin_login: String,
    pub admin_password: String,
    pub bind_addr: String,
}

/// Env
///
/// Runtime context: `Local` favours convenience (pretty logs, optional database, opt-in bypass),
/// `Production` demands every secret explicitly.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe, non-panicking values for tests: local mode, in-memory store.
    fn default() -> Self {
        Self {
            env: Env::Local,
            dev_auth_bypass: false,
            db_url: None,
            db_max_connections: 5,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            jwt_ttl_secs: 3600,
            admin_login: "admin".to_string(),
            admin_password: "qwerty".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (after `.env` has been applied).
    ///
    /// # Panics
    /// In `Env::Production`, panics when `DATABASE_URL`, `JWT_SECRET`, `ADMIN_LOGIN` or
    /// `ADMIN_PASSWORD` is missing, so the server never starts half-configured. Also panics when
    /// a numeric variable is set but does not parse.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };
        let defaults = Self::default();

        let db_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", defaults.db_max_connections);
        let jwt_ttl_secs = parse_var("JWT_TTL_SECS", defaults.jwt_ttl_secs);
        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        match env {
            Env::Local => Self {
                env: Env::Local,
                dev_auth_bypass: matches!(
                    env::var("AUTH_DEV_BYPASS").as_deref(),
                    Ok("true") | Ok("1")
                ),
                // Optional locally: without it the in-memory store is used.
                db_url: env::var("DATABASE_URL").ok(),
                db_max_connections,
                jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
                jwt_ttl_secs,
                admin_login: env::var("ADMIN_LOGIN").unwrap_or(defaults.admin_login),
                admin_password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
                bind_addr,
            },
            Env::Production => Self {
                env: Env::Production,
                dev_auth_bypass: false,
                db_url: Some(
                    env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                ),
                db_max_connections,
                jwt_secret: env::var("JWT_SECRET").expect("FATAL: JWT_SECRET required in prod"),
                jwt_ttl_secs,
                admin_login: env::var("ADMIN_LOGIN").expect("FATAL: ADMIN_LOGIN required in prod"),
                admin_password: env::var("ADMIN_PASSWORD")
                    .expect("FATAL: ADMIN_PASSWORD required in prod"),
                bind_addr,
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("FATAL: {name} must be a number, got {raw:?}")),
        Err(_) => default,
    }
}
