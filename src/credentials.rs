//! Session credentials.
//!
//! The store authenticates through a cookie session that some external
//! login flow established. The transport only asks a [`CredentialProvider`]
//! for the cookie value before each request, so tests and embedders can
//! substitute their own.

pub trait CredentialProvider: Send + Sync {
    /// Value for the `Cookie` request header, if a session exists.
    fn session_cookie(&self) -> Option<String>;
}

/// Fixed cookie captured from an existing browser session.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub String);

impl CredentialProvider for SessionCookie {
    fn session_cookie(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Sends requests without any credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn session_cookie(&self) -> Option<String> {
        None
    }
}
