//! PostgREST client for the `tasks` collection.
//!
//! Requests go to `{endpoint}/rest/v1/{collection}` with the access key sent
//! as both the `apikey` header and a bearer token. Writes ask for
//! `Prefer: return=representation` so an update or delete that matched no
//! row can be told apart from one that succeeded.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use zf_config::RemoteConfig;
use zf_core::entities::{NewTask, Task};

use crate::error::RemoteError;
use crate::http::{check_response, decode_json};
use crate::{RemoteRecordService, TaskPatch};

const PREFER_REPRESENTATION: &str = "return=representation";

/// HTTP-backed [`RemoteRecordService`].
pub struct RestRecordService {
    http: reqwest::Client,
    collection_url: String,
    collection: String,
}

impl RestRecordService {
    /// Build a client for the collection described by `config`.
    ///
    /// The caller is expected to have checked `config.is_configured()`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Connection`] if the access key cannot be sent
    /// as a header or the underlying `reqwest::Client` fails to build.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let key = config.access_key.trim();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(key)?);
        headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {key}"))?);

        let http = reqwest::Client::builder()
            .user_agent("zenfocus/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            collection_url: format!(
                "{}/rest/v1/{}",
                config.base_url(),
                urlencoding::encode(config.collection.trim())
            ),
            collection: config.collection.trim().to_string(),
        })
    }

    fn list_url(&self) -> String {
        format!("{}?select=*&order=created_at.desc", self.collection_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}?id=eq.{}", self.collection_url, urlencoding::encode(id))
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, RemoteError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| RemoteError::Connection(format!("access key is not a valid header: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Insert rejections carry a validation meaning; everything else stays a query error.
fn as_insert_error(e: RemoteError) -> RemoteError {
    match e {
        RemoteError::Query { status, message } if matches!(status, 400 | 409 | 422) => {
            RemoteError::Validation { status, message }
        }
        other => other,
    }
}

/// Rows echoed back by a write. Only the count matters.
fn ensure_matched(rows: &[serde_json::Value], id: &str) -> Result<(), RemoteError> {
    if rows.is_empty() {
        return Err(RemoteError::NotFound { id: id.to_string() });
    }
    Ok(())
}

#[async_trait]
impl RemoteRecordService for RestRecordService {
    async fn list(&self) -> Result<Vec<Task>, RemoteError> {
        tracing::debug!(collection = %self.collection, "listing records");
        let resp = check_response(self.http.get(self.list_url()).send().await?).await?;
        decode_json(resp).await
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, RemoteError> {
        tracing::debug!(collection = %self.collection, title = %task.title, "inserting record");
        let resp = self
            .http
            .post(&self.collection_url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&[task])
            .send()
            .await?;
        let resp = check_response(resp).await.map_err(as_insert_error)?;

        let rows: Vec<Task> = decode_json(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::Parse("insert returned no rows".into()))
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<(), RemoteError> {
        tracing::debug!(collection = %self.collection, id, "updating record");
        let resp = self
            .http
            .patch(self.record_url(id))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(patch)
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = decode_json(check_response(resp).await?).await?;
        ensure_matched(&rows, id)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        tracing::debug!(collection = %self.collection, id, "deleting record");
        let resp = self
            .http
            .delete(self.record_url(id))
            .header("Prefer", PREFER_REPRESENTATION)
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = decode_json(check_response(resp).await?).await?;
        ensure_matched(&rows, id)
    }
}
