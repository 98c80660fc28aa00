use secrecy::{ExposeSecret, SecretString};

/// Bearer token issued by the token exchange endpoint.
///
/// Tokens are short-lived and requested fresh for every upstream call, so
/// no expiry is tracked. The value is wrapped in `SecretString` and only
/// leaves the type through [`AccessToken::authorization`].
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into().into()))
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}
