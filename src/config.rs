//! Client configuration
//!
//! A [`ClientConfig`] is always complete: the API token is resolved when the
//! config is built, either from an explicit value or from the
//! `BASEROW_TOKEN` environment variable. A missing token is a configuration
//! error, never a silent default.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use std::fmt;
use std::time::Duration;

/// Hosted Baserow API
pub const DEFAULT_BASE_URL: &str = "https://api.baserow.io/api/";

/// Environment variable holding the database token
pub const TOKEN_ENV_VAR: &str = "BASEROW_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV_VAR: &str = "BASEROW_URL";

/// Environment variable holding the login username
pub const USER_ENV_VAR: &str = "BASEROW_USER";

/// Environment variable holding the login password
pub const PASSWORD_ENV_VAR: &str = "BASEROW_PW";

/// Environment variable holding the database id to introspect
pub const DATABASE_ID_ENV_VAR: &str = "BASEROW_DB_ID";

/// Placeholder value that counts as "no token"
pub const TOKEN_NOT_SET: &str = "NOT_SET";

/// Make sure a base URL ends with exactly one `/`
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    format!("{trimmed}/")
}

/// Pick the explicit token or fall back to [`TOKEN_ENV_VAR`]
///
/// `lookup` reads an environment variable; tests pass a closure instead of
/// touching the process environment.
pub fn resolve_token<F>(explicit: Option<String>, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .or_else(|| lookup(TOKEN_ENV_VAR))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty() && token != TOKEN_NOT_SET)
        .ok_or_else(|| Error::missing_field(TOKEN_ENV_VAR))
}

/// Configuration for a [`crate::BaserowClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, always ending with `/`
    pub base_url: String,
    /// Database token for row endpoints
    pub token: String,
    /// Login credentials for structural endpoints
    pub credentials: Option<Credentials>,
    /// Database whose schema is fetched at construction
    pub database_id: Option<u64>,
    /// Transport settings
    pub http: HttpClientConfig,
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Read the whole configuration from `BASEROW_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup(BASE_URL_ENV_VAR) {
            builder = builder.base_url(url);
        }

        if let (Some(user), Some(password)) = (lookup(USER_ENV_VAR), lookup(PASSWORD_ENV_VAR)) {
            builder = builder.credentials(user, password);
        }

        if let Some(raw) = lookup(DATABASE_ID_ENV_VAR) {
            let id = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::InvalidConfigValue {
                    field: DATABASE_ID_ENV_VAR.to_string(),
                    message: e.to_string(),
                })?;
            builder = builder.database_id(id);
        }

        builder.build_with(lookup)
    }

    /// Transport config with the base URL filled in
    pub fn http_config(&self) -> HttpClientConfig {
        let mut http = self.http.clone();
        http.base_url = Some(self.base_url.clone());
        http
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"***REDACTED***")
            .field("credentials", &self.credentials)
            .field("database_id", &self.database_id)
            .field("http", &self.http)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    token: Option<String>,
    credentials: Option<Credentials>,
    database_id: Option<u64>,
    http: HttpClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API base URL (normalized on build)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the database token explicitly
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set login credentials
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Fetch the schema of this database when the client is constructed
    #[must_use]
    pub fn database_id(mut self, id: u64) -> Self {
        self.database_id = Some(id);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Retry transient failures this many times
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.http.max_retries = retries;
        self
    }

    /// Throttle outgoing requests
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.http.rate_limit = Some(config);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.http.user_agent = agent.into();
        self
    }

    /// Build, resolving a missing token from the process environment
    pub fn build(self) -> Result<ClientConfig> {
        self.build_with(|key| std::env::var(key).ok())
    }

    /// Build, resolving a missing token through `lookup`
    pub fn build_with<F>(self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = resolve_token(self.token, lookup)?;

        let base_url =
            normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
        url::Url::parse(&base_url)?;

        if let Some(credentials) = &self.credentials {
            if !credentials.is_complete() {
                return Err(Error::InvalidConfigValue {
                    field: "credentials".to_string(),
                    message: "username and password must not be empty".to_string(),
                });
            }
        }

        Ok(ClientConfig {
            base_url,
            token,
            credentials: self.credentials,
            database_id: self.database_id,
            http: self.http,
        })
    }
}
