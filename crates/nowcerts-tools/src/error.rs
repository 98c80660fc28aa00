//! Error types for the insured tools.

use thiserror::Error;

use nowcerts_client::ClientError;

/// Failure of a tool operation, classified by the step that failed.
///
/// Tool operations never hand these to the agent directly; they are
/// rendered into the text result at the tool boundary.
#[derive(Debug, Error)]
pub enum InsuredToolError {
    /// The API key could not be exchanged for a bearer token.
    #[error("token exchange failed: {0}")]
    Token(#[source] ClientError),

    /// The list or insert call itself failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] ClientError),
}

impl InsuredToolError {
    /// The underlying client error.
    pub const fn client_error(&self) -> &ClientError {
        match self {
            Self::Token(err) | Self::Upstream(err) => err,
        }
    }

    /// Check if this is a token exchange failure.
    pub const fn is_token_error(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}
