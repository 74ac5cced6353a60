//! Google Cloud Storage backend speaking the JSON API over `reqwest`.
//!
//! # Design
//! - Listing follows `nextPageToken` until the store reports no further pages.
//! - Downloads use `alt=media` and require the body to be UTF-8.
//! - Authentication is limited to an optional operator-supplied bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectRef, ObjectStore};

/// Public Google Cloud Storage endpoint.
pub const DEFAULT_GCS_ENDPOINT: &str = "https://storage.googleapis.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const LIST_PAGE_SIZE: &str = "1000";

/// Connection settings for [`GcsStore`].
#[derive(Debug, Clone)]
pub struct GcsConfig {
    /// Base endpoint, e.g. [`DEFAULT_GCS_ENDPOINT`] or an emulator URL.
    pub endpoint: String,
    /// Bucket holding the corpus objects.
    pub bucket: String,
    /// Optional OAuth bearer token attached to every request.
    pub bearer_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GcsConfig {
    /// Settings for `bucket` on the public endpoint without credentials.
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_GCS_ENDPOINT.to_string(),
            bucket: bucket.into(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Object store backed by a Google Cloud Storage bucket.
#[derive(Clone)]
pub struct GcsStore {
    client: Client,
    base: Url,
    bucket: String,
    bearer_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    items: Vec<ListItem>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ListItem {
    name: String,
    // The JSON API encodes uint64 values as strings.
    size: Option<String>,
}

impl GcsStore {
    /// Validate `config` and build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for an empty bucket or an unusable endpoint,
    /// and [`StoreError::Request`] when the HTTP client cannot be constructed.
    pub fn new(config: GcsConfig) -> StoreResult<Self> {
        let bucket = config.bucket.trim();
        if bucket.is_empty() {
            return Err(StoreError::InvalidConfig {
                field: "bucket",
                reason: "empty",
                value: None,
            });
        }

        let endpoint = config.endpoint.trim();
        let base = Url::parse(endpoint).map_err(|_| StoreError::InvalidConfig {
            field: "endpoint",
            reason: "invalid_url",
            value: Some(endpoint.to_string()),
        })?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidConfig {
                field: "endpoint",
                reason: "not_a_base_url",
                value: Some(endpoint.to_string()),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| StoreError::request("client.build", endpoint, source))?;

        Ok(Self {
            client,
            base,
            bucket: bucket.to_string(),
            bearer_token: config
                .bearer_token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
        })
    }

    /// Bucket this store reads from.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn objects_url(&self) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base endpoints, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "b", self.bucket.as_str(), "o"]);
        }
        url
    }

    pub(crate) fn object_url(&self, key: &str) -> Url {
        let mut url = self.objects_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn list_page(&self, prefix: &str, page_token: Option<&str>) -> StoreResult<ListPage> {
        let mut url = self.objects_url();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("prefix", prefix)
                .append_pair("maxResults", LIST_PAGE_SIZE)
                .append_pair("fields", "items(name,size),nextPageToken");
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|source| StoreError::request("list", prefix, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::status("list", prefix, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| StoreError::request("list", prefix, source))?;
        serde_json::from_slice(&body).map_err(|source| StoreError::Json {
            target: prefix.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>> {
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(prefix, page_token.as_deref()).await?;
            debug!(
                bucket = %self.bucket,
                prefix,
                items = page.items.len(),
                "listed object page"
            );
            objects.extend(page.items.into_iter().map(|item| ObjectRef {
                size: item.size.and_then(|size| size.parse().ok()),
                key: item.name,
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn fetch_text(&self, object: &ObjectRef) -> StoreResult<String> {
        let mut url = self.object_url(&object.key);
        url.query_pairs_mut().append_pair("alt", "media");

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|source| StoreError::request("fetch_text", &object.key, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::status(
                "fetch_text",
                &object.key,
                status.as_u16(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| StoreError::request("fetch_text", &object.key, source))?;
        String::from_utf8(body.to_vec()).map_err(|source| StoreError::Utf8 {
            target: object.key.clone(),
            source,
        })
    }
}
