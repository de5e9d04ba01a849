//! Bearer-authenticated JSON client for the hoctap backend.
//!
//! Every response is classified into an [`ApiResult`]: transport failures,
//! non-2xx statuses and `success: false` envelopes all become [`ApiError`].
//! Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use hoctap_core::error::{ApiError, ApiResult};
use hoctap_core::session::Session;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Acknowledgement for endpoints whose payload carries nothing but the envelope.
pub type Ack = IgnoredAny;

/// Error body shape: `{ "success": false, "message": "..." }`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the backend REST API.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<Session>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS), session)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration, session: Arc<Session>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    /// GET and decode one named field of the payload, e.g. `topics`.
    pub async fn get_field<T: DeserializeOwned>(&self, path: &str, field: &str) -> ApiResult<T> {
        let payload: Value = self.get(path).await?;
        take_field(payload, field)
    }

    #[instrument(skip(self, body))]
    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(body);
        }
        request = self.authorize(request);

        let response = request.send().await.map_err(|e| {
            tracing::debug!("no response: {e}");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(status, "response received");

        decode_response(status, &text)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Turn a status and body into the typed payload or a classified error.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, text: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(text)
            .ok()
            .and_then(|b| b.message);
        return Err(ApiError::from_status(status, message));
    }

    let payload: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?
    };

    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(ApiError::Rejected(message));
    }

    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn take_field<T: DeserializeOwned>(mut payload: Value, field: &str) -> ApiResult<T> {
    let value = payload
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("missing field `{field}`")))?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The optional `message` of a successful envelope, for confirmation toasts.
#[derive(Debug, Deserialize)]
pub struct MessageOnly {
    #[serde(default)]
    pub message: Option<String>,
}
