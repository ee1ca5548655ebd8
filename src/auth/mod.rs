//! Authentication module
//!
//! Supports the two Baserow schemes: the static database token (`Token`) and
//! the login-derived token (`JWT`). The login exchange happens once, when a
//! client is constructed.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, LOGIN_PATH};
pub use types::{AuthScheme, Credentials, LoginResponse};

#[cfg(test)]
mod tests;
