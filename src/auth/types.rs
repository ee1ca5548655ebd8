//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Which credential an endpoint expects in its `Authorization` header
///
/// Row data endpoints accept the long-lived database token. Structural
/// endpoints (tables and fields) require the short-lived token obtained by
/// logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Token <database token>`
    Token,
    /// `Authorization: JWT <login token>`
    Jwt,
}

impl AuthScheme {
    /// Header value prefix for this scheme
    pub fn prefix(&self) -> &'static str {
        match self {
            AuthScheme::Token => "Token",
            AuthScheme::Jwt => "JWT",
        }
    }

    /// Format an `Authorization` header value
    pub fn header_value(&self, token: &str) -> String {
        format!("{} {token}", self.prefix())
    }
}

/// Username and password used for the login exchange
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account e-mail / username
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both parts are present
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

/// Body of a successful `user/token-auth/` response
///
/// Older servers send only `token`; newer ones also send `access_token`,
/// which takes precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// Token to send with the `JWT` scheme
    pub fn into_jwt(self) -> Option<String> {
        self.access_token
            .or(self.token)
            .filter(|token| !token.is_empty())
    }
}
