//! The insured list and insert operations.
//!
//! Both operations return typed outcomes. [`ListOutcome::into_text`] and
//! [`insert_text`] turn them into the plain strings handed back to the agent.

use std::fmt;
use std::sync::Arc;

use log::{error, info, warn};
use serde_json::Value;

use nowcerts_client::InsuredApi;
use nowcerts_common::{InsuredPayload, InsuredRecord, ListQuery};

use crate::cache::SummaryCache;
use crate::error::InsuredToolError;

/// Returned when the upstream list is empty.
pub const NO_RECORDS_MESSAGE: &str = "No insured records found.";

/// Maximum number of records rendered into a list summary.
pub const DEFAULT_SUMMARY_LIMIT: usize = 5;

const SUMMARY_SEPARATOR: &str = "\n\n";

/// Result of a list call.
#[derive(Debug)]
pub enum ListOutcome {
    /// Served from a fresh cache entry without touching the network.
    Cached(String),
    /// Fetched from upstream and written to the cache.
    Fetched {
        summary: String,
        /// Records rendered into the summary.
        rendered: usize,
    },
    /// Upstream returned no records. The cache was left untouched.
    Empty,
    /// The fetch failed and the last cached summary was served instead.
    Stale {
        summary: String,
        error: InsuredToolError,
    },
    /// The fetch failed and nothing was cached.
    Failed(InsuredToolError),
}

impl ListOutcome {
    /// The text handed back to the agent.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Cached(summary) | Self::Fetched { summary, .. } | Self::Stale { summary, .. } => {
                summary
            }
            Self::Empty => NO_RECORDS_MESSAGE.to_string(),
            Self::Failed(error) => format!("Error: {error}"),
        }
    }
}

/// A successful insert, echoing the upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertConfirmation {
    pub first_name: String,
    pub last_name: String,
    pub response: Value,
}

impl fmt::Display for InsertConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully inserted insured: {} {}. Response: {}",
            self.first_name, self.last_name, self.response
        )
    }
}

/// The text handed back to the agent for an insert.
#[must_use]
pub fn insert_text(result: &Result<InsertConfirmation, InsuredToolError>) -> String {
    match result {
        Ok(confirmation) => confirmation.to_string(),
        Err(error) => format!("Error inserting insured: {error}"),
    }
}

/// Render the first `limit` records, one per paragraph.
#[must_use]
pub fn render_summary(items: &[Value], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Insured list and insert operations over an [`InsuredApi`].
///
/// The summary cache is owned outside and injected, so several tool
/// front-ends can share one slot.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use nowcerts_client::NowCertsClient;
/// use nowcerts_common::{ApiConfig, ListQuery};
/// use nowcerts_tools::{InsuredTools, SummaryCache};
///
/// # async fn example() -> Result<(), nowcerts_client::ClientError> {
/// let client = NowCertsClient::new(ApiConfig::new("amp_ai_..."))?;
/// let tools = InsuredTools::new(Arc::new(client), Arc::new(SummaryCache::default()));
///
/// let text = tools.list(ListQuery::default()).await.into_text();
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
pub struct InsuredTools {
    api: Arc<dyn InsuredApi>,
    cache: Arc<SummaryCache>,
    summary_limit: usize,
}

impl fmt::Debug for InsuredTools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsuredTools")
            .field("cache", &self.cache)
            .field("summary_limit", &self.summary_limit)
            .finish_non_exhaustive()
    }
}

impl InsuredTools {
    #[must_use]
    pub fn new(api: Arc<dyn InsuredApi>, cache: Arc<SummaryCache>) -> Self {
        Self {
            api,
            cache,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }

    /// Set how many records a list summary renders.
    #[must_use]
    pub const fn with_summary_limit(mut self, summary_limit: usize) -> Self {
        self.summary_limit = summary_limit;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// List insured records, serving the cache when it is fresh.
    ///
    /// The cache slot is shared by all queries: a fresh entry is returned
    /// even if it was fetched with different `top`/`skip` values.
    pub async fn list(&self, query: ListQuery) -> ListOutcome {
        info!(
            "get_insured_list called with top={}, skip={}",
            query.top, query.skip
        );

        if let Some(summary) = self.cache.fresh().await {
            info!("get_insured_list returning cached result");
            return ListOutcome::Cached(summary);
        }

        match self.fetch_items(query).await {
            Ok(items) if items.is_empty() => {
                info!("get_insured_list: no items returned from API");
                ListOutcome::Empty
            }
            Ok(items) => {
                let rendered = items.len().min(self.summary_limit);
                let summary = render_summary(&items, self.summary_limit);
                self.cache.store(summary.clone()).await;
                info!("get_insured_list returning {rendered} items");
                ListOutcome::Fetched { summary, rendered }
            }
            Err(error) => {
                error!("Error in get_insured_list: {error}");
                match self.cache.last().await {
                    Some(summary) => {
                        warn!("get_insured_list returning stale cached result due to error");
                        ListOutcome::Stale { summary, error }
                    }
                    None => ListOutcome::Failed(error),
                }
            }
        }
    }

    /// Create an insured record upstream.
    ///
    /// A fresh token is requested for every insert. There is no retry and no
    /// idempotency key, so repeating a call may create a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`InsuredToolError::Token`] if the token exchange fails and
    /// [`InsuredToolError::Upstream`] if the insert call fails.
    pub async fn insert(
        &self,
        record: &InsuredRecord,
    ) -> Result<InsertConfirmation, InsuredToolError> {
        info!(
            "insert_insured called with first_name={}, last_name={}",
            record.first_name, record.last_name
        );

        let result = self.insert_record(record).await;
        match &result {
            Ok(_) => info!(
                "insert_insured succeeded for {} {}",
                record.first_name, record.last_name
            ),
            Err(error) => error!("Error in insert_insured: {error}"),
        }
        result
    }

    async fn fetch_items(&self, query: ListQuery) -> Result<Vec<Value>, InsuredToolError> {
        let token = self
            .api
            .obtain_token()
            .await
            .map_err(InsuredToolError::Token)?;
        info!("get_insured_list obtained access token: <redacted>");

        self.api
            .list_insureds(&token, query)
            .await
            .map_err(InsuredToolError::Upstream)
    }

    async fn insert_record(
        &self,
        record: &InsuredRecord,
    ) -> Result<InsertConfirmation, InsuredToolError> {
        let token = self
            .api
            .obtain_token()
            .await
            .map_err(InsuredToolError::Token)?;
        info!("insert_insured obtained access token: <redacted>");

        let payload = InsuredPayload::from(record);
        let response = self
            .api
            .insert_insured(&token, &payload)
            .await
            .map_err(InsuredToolError::Upstream)?;

        Ok(InsertConfirmation {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            response,
        })
    }
}
