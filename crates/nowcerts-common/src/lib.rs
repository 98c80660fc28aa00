//! # nowcerts-common
//!
//! Common types shared by the NowCerts insured tool server crates.
//!
//! This crate provides the data model for talking to the NowCerts REST API:
//! - Insured records and their upstream payload mapping
//! - List query parameters with their defaults
//! - Bearer tokens held as secrets
//! - Upstream API configuration
//!
//! ## Example
//!
//! ```
//! use nowcerts_common::{InsuredPayload, InsuredRecord, ListQuery};
//!
//! let record = InsuredRecord::builder()
//!     .database_id("db-1")
//!     .first_name("Ada")
//!     .last_name("Lovelace")
//!     .build();
//!
//! let payload = InsuredPayload::from(&record);
//! assert_eq!(payload.first_name, "Ada");
//! assert!(payload.active);
//!
//! let query = ListQuery::default();
//! assert_eq!(query.top, 30);
//! assert_eq!(query.skip, 0);
//! ```

/// Upstream API configuration.
///
/// Base URL, API key and per-request timeout used by the REST client.
pub mod config;
/// Insured record, upstream payload and list query types.
pub mod insured;
/// Short-lived bearer tokens.
pub mod token;

pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use insured::{InsuredPayload, InsuredRecord, ListQuery};
pub use token::AccessToken;
