// src/infrastructure/supabase.rs
use crate::application::{CompanionRepository, CompanionStore};
use crate::constants::REST_PATH;
use crate::domain::{Companion, CompanionFilter, DomainError};
use crate::infrastructure::{AccessTokenProvider, StaticTokenProvider, StoreConfig};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Error body returned by the REST interface
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
}

/// Companion table behind a PostgREST-style HTTP interface.
#[derive(Clone)]
pub struct SupabaseRepository {
    http: reqwest::Client,
    table_url: Url,
    anon_key: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl std::fmt::Debug for SupabaseRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseRepository")
            .field("table_url", &self.table_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseRepository {
    /// Build a client for the configured store.
    ///
    /// Fails with `DomainError::Configuration` when the URL or key is missing,
    /// or the URL cannot carry a path.
    pub fn new(
        config: &StoreConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, DomainError> {
        let url = required(config.url.as_deref(), "store URL")?;
        let anon_key = required(config.anon_key.as_deref(), "store access key")?;
        let table_url = table_url(&url, &config.table)?;

        // Header values must be visible ASCII
        HeaderValue::from_str(&anon_key).map_err(|_| {
            DomainError::Configuration("store access key contains invalid characters".to_string())
        })?;

        info!(url = %table_url, "Configured companion store");
        Ok(Self {
            http: reqwest::Client::new(),
            table_url,
            anon_key,
            tokens,
        })
    }

    /// Same store and connection pool, acting with other credentials
    pub fn with_tokens(&self, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            tokens,
            ..self.clone()
        }
    }

    /// Token to present as bearer; any auth failure degrades to the anon key.
    async fn bearer(&self) -> String {
        match self.tokens.access_token().await {
            Ok(Some(token)) => token,
            Ok(None) => self.anon_key.clone(),
            Err(e) => {
                warn!(error = %e, "Error getting auth token");
                self.anon_key.clone()
            }
        }
    }

    async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", value);
        }
        let bearer = self.bearer().await;
        let authorization = HeaderValue::from_str(&format!("Bearer {bearer}"))
            .or_else(|_| HeaderValue::from_str(&format!("Bearer {}", self.anon_key)));
        if let Ok(value) = authorization {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn list_url(&self, filter: &CompanionFilter) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(subject) = &filter.subject {
                query.append_pair("subject", &format!("eq.{subject}"));
            }
            if let Some(topic) = &filter.topic {
                let pattern = literal_pattern(topic);
                query.append_pair(
                    "or",
                    &format!("(topic.imatch.{pattern},name.imatch.{pattern})"),
                );
            }
        }
        url
    }

    fn delete_url(&self, id: &str) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        url
    }
}

impl CompanionStore for SupabaseRepository {
    /// The caller's token, or the anon key when there is none. Tokens
    /// configured on `self` are never used for another caller.
    fn for_session(&self, access_token: Option<String>) -> Arc<dyn CompanionRepository> {
        Arc::new(self.with_tokens(Arc::new(StaticTokenProvider::new(access_token))))
    }
}

#[async_trait]
impl CompanionRepository for SupabaseRepository {
    #[instrument(level = "debug", skip(self))]
    async fn list_companions(
        &self,
        filter: &CompanionFilter,
    ) -> Result<Vec<Companion>, DomainError> {
        let url = self.list_url(filter);
        debug!(%url, "Querying companions");

        let response = self
            .http
            .get(url)
            .headers(self.headers().await)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        read_rows(response).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_companion(&self, id: &str) -> Result<Companion, DomainError> {
        let url = self.delete_url(id);
        debug!(%url, "Deleting companion");

        let response = self
            .http
            .delete(url)
            .headers(self.headers().await)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::CompanionNotFound(id.to_string()))
    }
}

async fn read_rows(response: reqwest::Response) -> Result<Vec<Companion>, DomainError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(remote_error(status.as_u16(), &body));
    }

    response
        .json::<Vec<Companion>>()
        .await
        .map_err(|e| DomainError::MalformedResponse(e.to_string()))
}

fn remote_error(status: u16, body: &str) -> DomainError {
    let message = serde_json::from_str::<StoreErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Store request failed with status {status}"));
    DomainError::Remote { status, message }
}

fn required(value: Option<&str>, what: &str) -> Result<String, DomainError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::Configuration(format!("Missing {what}")))
}

fn table_url(base: &str, table: &str) -> Result<Url, DomainError> {
    let mut url = Url::parse(base)
        .map_err(|e| DomainError::Configuration(format!("Invalid store URL {base}: {e}")))?;
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| DomainError::Configuration(format!("Store URL cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(REST_PATH)
        .push(table);
    Ok(url)
}

/// Case-insensitive regex (`imatch`) that matches `value` literally as a
/// substring; `%`, `_` and `*` are ordinary characters.
///
/// The result is double-quoted so commas and parentheses in user input
/// cannot break out of the `or=(...)` expression.
fn literal_pattern(value: &str) -> String {
    let escaped = regex::escape(value)
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!("\"{escaped}\"")
}
