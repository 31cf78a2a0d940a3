//! Main CareClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use carepage::model::{NoteStatus, RowRequest, StoolSheet};
use carepage::source::{ActionReply, MessageReply};
use carepage::widgets::FormFields;
use carepage::{ContentSource, Endpoints, SourceError};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ClientError;

/// Header the backend uses to tell fragment requests from page loads.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// HTTP client for the care backend.
///
/// Cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use carepage_client::CareClient;
///
/// let client = CareClient::builder()
///     .base_url("http://localhost:5000")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let markup = client.impression().await?;
/// ```
#[derive(Clone)]
pub struct CareClient {
    inner: Arc<CareClientInner>,
}

struct CareClientInner {
    base_url: Url,
    endpoints: Endpoints,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CareClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CareClientBuilder<Missing> {
        CareClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Resolve an endpoint path against the base URL, keeping any base path prefix.
    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| self.send_error(e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log::warn!("CareClient: HTTP {} ({} bytes)", status, body.len());
            Err(ClientError::http(status, body))
        }
    }

    fn send_error(&self, err: reqwest::Error) -> ClientError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ClientError::Timeout(timeout),
            _ => ClientError::Network(err),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
        let body = response.text().await.map_err(|e| self.send_error(e))?;
        serde_json::from_str(&body).map_err(|e| ClientError::parse_with_body(e.to_string(), body))
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// GET `path` and return the body as markup.
    pub async fn get_markup(&self, path: &str) -> Result<String, ClientError> {
        log::debug!("CareClient: GET {}", path);
        let response = self.send(self.request(Method::GET, self.url(path)?)).await?;
        response.text().await.map_err(|e| self.send_error(e))
    }

    /// POST `body` as JSON to `path` and return the body as markup.
    pub async fn post_json_markup<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ClientError> {
        log::debug!("CareClient: POST {}", path);
        let request = self.request(Method::POST, self.url(path)?).json(body);
        let response = self.send(request).await?;
        response.text().await.map_err(|e| self.send_error(e))
    }

    /// POST `body` as JSON to `path` and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("CareClient: POST {}", path);
        let request = self.request(Method::POST, self.url(path)?).json(body);
        let response = self.send(request).await?;
        self.read_json(response).await
    }

    /// POST `fields` url-encoded to `path` and decode the JSON reply.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &FormFields,
    ) -> Result<T, ClientError> {
        log::debug!("CareClient: POST {} ({} fields)", path, fields.len());
        let request = self.request(Method::POST, self.url(path)?).form(fields);
        let response = self.send(request).await?;
        self.read_json(response).await
    }

    /// POST `body` as JSON to `path` and return the raw bytes.
    pub async fn post_json_bytes<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>, ClientError> {
        log::debug!("CareClient: POST {}", path);
        let request = self.request(Method::POST, self.url(path)?).json(body);
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| self.send_error(e))?;
        Ok(bytes.to_vec())
    }

    /// Stool chart figure for the resident `pk`.
    pub async fn stool_chart_figure(&self, pk: &str) -> Result<serde_json::Value, ClientError> {
        let mut url = self.url(&self.inner.endpoints.stool_chart)?;
        url.query_pairs_mut().append_pair("pk", pk);
        log::debug!("CareClient: GET {}", url.path());
        let response = self.send(self.request(Method::GET, url)).await?;
        self.read_json(response).await
    }
}

impl std::fmt::Debug for CareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CareClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

#[async_trait]
impl ContentSource for CareClient {
    async fn impression(&self) -> Result<String, SourceError> {
        Ok(self.get_markup(&self.inner.endpoints.impression).await?)
    }

    async fn stool_sheet(&self) -> Result<String, SourceError> {
        Ok(self.get_markup(&self.inner.endpoints.stool_sheet).await?)
    }

    async fn save_stool_sheet(&self, sheet: &StoolSheet) -> Result<MessageReply, SourceError> {
        Ok(self.post_json(&self.inner.endpoints.stool_sheet, sheet).await?)
    }

    async fn row_detail(&self, row: &RowRequest) -> Result<String, SourceError> {
        Ok(self.post_json_markup(&self.inner.endpoints.row_detail, row).await?)
    }

    async fn row_detail_alt(&self, row: &RowRequest) -> Result<String, SourceError> {
        Ok(self
            .post_json_markup(&self.inner.endpoints.row_detail_alt, row)
            .await?)
    }

    async fn row_pdf(&self, row: &RowRequest) -> Result<Vec<u8>, SourceError> {
        Ok(self.post_json_bytes(&self.inner.endpoints.row_pdf, row).await?)
    }

    async fn update_status(&self, status: &NoteStatus) -> Result<serde_json::Value, SourceError> {
        Ok(self.post_json(&self.inner.endpoints.update_status, status).await?)
    }

    async fn add_resident(&self, fields: &FormFields) -> Result<ActionReply, SourceError> {
        Ok(self.post_form(&self.inner.endpoints.add_resident, fields).await?)
    }

    async fn delete_resident(&self, fields: &FormFields) -> Result<ActionReply, SourceError> {
        Ok(self
            .post_form(&self.inner.endpoints.delete_resident, fields)
            .await?)
    }

    async fn stool_chart(&self, pk: &str) -> Result<serde_json::Value, SourceError> {
        Ok(self.stool_chart_figure(pk).await?)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CareClient`].
///
/// `base_url` is required and checked at compile time; it is parsed in
/// [`CareClientBuilder::build`].
pub struct CareClientBuilder<BaseUrl> {
    base_url: BaseUrl,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CareClientBuilder<Missing> {
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            endpoints: Endpoints::default(),
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend root, e.g. `http://localhost:5000`.
    pub fn base_url(self, base_url: impl Into<String>) -> CareClientBuilder<Set<String>> {
        CareClientBuilder {
            base_url: Set(base_url.into()),
            endpoints: self.endpoints,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for CareClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> CareClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides endpoint paths. Defaults to [`Endpoints::default`].
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CareClientBuilder<Set<String>> {
    /// Builds the [`CareClient`].
    ///
    /// Fails when the base URL is not an absolute `http`/`https` URL.
    pub fn build(self) -> Result<CareClient, ClientError> {
        let raw = self.base_url.0;
        let base_url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(raw));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder().build()?,
        };

        Ok(CareClient {
            inner: Arc::new(CareClientInner {
                base_url,
                endpoints: self.endpoints,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
