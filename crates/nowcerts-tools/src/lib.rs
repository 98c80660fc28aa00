//! # nowcerts-tools
//!
//! The insured list and insert operations exposed to agents.
//!
//! [`InsuredTools`] wraps any [`nowcerts_client::InsuredApi`] and adds the
//! behaviour the agent sees:
//! - a single process-wide [`SummaryCache`] slot with a 5 minute TTL
//! - stale-on-error fallback for the list
//! - plain-text rendering of every outcome, including failures
//!
//! Neither operation retries. A failed insert is reported once and never
//! repeated, since the upstream insert is not idempotent.

pub mod cache;
pub mod error;
pub mod insured;

pub use cache::{CacheEntry, DEFAULT_CACHE_TTL, SummaryCache};
pub use error::InsuredToolError;
pub use insured::{
    DEFAULT_SUMMARY_LIMIT, InsertConfirmation, InsuredTools, ListOutcome, NO_RECORDS_MESSAGE,
    insert_text, render_summary,
};
