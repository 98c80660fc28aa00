//! # nowcerts-client
//!
//! Client library for the NowCerts REST API.
//!
//! This crate exposes the three upstream calls the insured tools need through
//! the [`InsuredApi`] trait:
//! - token exchange (static API key for a short-lived bearer token)
//! - insured list (OData endpoint, newest changes first)
//! - insured insert
//!
//! [`NowCertsClient`] is the HTTP implementation. Tokens are never cached;
//! every caller that needs one asks for a new one.
//!
//! ## Example
//!
//! ```no_run
//! use nowcerts_client::{InsuredApi, NowCertsClient};
//! use nowcerts_common::{ApiConfig, ListQuery};
//!
//! # async fn example() -> Result<(), nowcerts_client::ClientError> {
//! let client = NowCertsClient::new(ApiConfig::new("amp_ai_..."))?;
//!
//! let token = client.obtain_token().await?;
//! let page = client.list_insureds(&token, ListQuery::default()).await?;
//! println!("{} insureds", page.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use nowcerts_common::{AccessToken, InsuredPayload, ListQuery};

pub mod client;
pub mod error;

pub use client::NowCertsClient;
pub use error::ClientError;

/// Upstream operations used by the insured tools.
///
/// Implementations must be thread-safe (Send + Sync) so a single instance
/// can serve concurrent tool calls.
#[async_trait]
pub trait InsuredApi: Send + Sync {
    /// Exchange the configured API key for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, returns a
    /// non-success status, or the response has no `accessToken`.
    async fn obtain_token(&self) -> Result<AccessToken, ClientError>;

    /// Fetch one page of insured records, newest changes first.
    ///
    /// Returns the raw records of the OData `value` array in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, non-success status or
    /// an unparseable body.
    async fn list_insureds(
        &self,
        token: &AccessToken,
        query: ListQuery,
    ) -> Result<Vec<Value>, ClientError>;

    /// Create an insured record and return the upstream response body.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout or non-success status.
    async fn insert_insured(
        &self,
        token: &AccessToken,
        payload: &InsuredPayload,
    ) -> Result<Value, ClientError>;
}
