//! Authenticator implementation
//!
//! Holds both tokens for the lifetime of a client and stamps the right one
//! onto each request.

use super::types::{AuthScheme, Credentials, LoginResponse};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

/// Path of the login endpoint, relative to the API base URL
pub const LOGIN_PATH: &str = "user/token-auth/";

/// Applies `Token` or `JWT` authorization to requests
#[derive(Clone)]
pub struct Authenticator {
    /// Long-lived database token for row endpoints
    api_token: String,
    /// Login-derived token for structural endpoints
    jwt: Option<String>,
}

impl Authenticator {
    /// Create an authenticator from already known tokens
    pub fn new(api_token: impl Into<String>, jwt: Option<String>) -> Self {
        Self {
            api_token: api_token.into(),
            jwt,
        }
    }

    /// Create an authenticator, logging in first when credentials are given
    pub async fn connect(
        http: &HttpClient,
        api_token: impl Into<String>,
        credentials: Option<&Credentials>,
    ) -> Result<Self> {
        let jwt = match credentials {
            Some(credentials) => Some(Self::login(http, credentials).await?),
            None => {
                debug!("No login credentials, structural endpoints unavailable");
                None
            }
        };
        Ok(Self::new(api_token, jwt))
    }

    /// Exchange username and password for a JWT
    pub async fn login(http: &HttpClient, credentials: &Credentials) -> Result<String> {
        if !credentials.is_complete() {
            return Err(Error::auth("username and password must not be empty"));
        }

        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });

        let response = http
            .execute(Method::POST, LOGIN_PATH, RequestConfig::new().json(body))
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth {
                message: format!("Login request failed with status {status}: {body}"),
            });
        }

        let text = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| Error::auth(format!("Could not read token from login response: {e}")))?;

        let jwt = login
            .into_jwt()
            .ok_or_else(|| Error::auth("login response carries no token"))?;

        info!("Logged in as {}", credentials.username);
        Ok(jwt)
    }

    /// Authorization header value for the given scheme
    pub fn authorization(&self, scheme: AuthScheme) -> Result<String> {
        match scheme {
            AuthScheme::Token => Ok(scheme.header_value(&self.api_token)),
            AuthScheme::Jwt => self
                .jwt
                .as_deref()
                .map(|jwt| scheme.header_value(jwt))
                .ok_or_else(|| {
                    Error::auth("this endpoint needs a JWT; configure username and password")
                }),
        }
    }

    /// Authorization header value for row endpoints; always available
    pub fn token_authorization(&self) -> String {
        AuthScheme::Token.header_value(&self.api_token)
    }

    /// Add the authorization header for `scheme` to a request
    pub fn apply(&self, config: RequestConfig, scheme: AuthScheme) -> Result<RequestConfig> {
        Ok(config.header("Authorization", self.authorization(scheme)?))
    }

    /// Whether a login token is available
    pub fn has_jwt(&self) -> bool {
        self.jwt.is_some()
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("api_token", &"***REDACTED***")
            .field("has_jwt", &self.jwt.is_some())
            .finish()
    }
}
