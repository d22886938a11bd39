use std::time::Instant;

use metrics::{counter, histogram};
use reqwest::{Client, Method, Response, Url, header::HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::infra::telemetry::{HTTP_REQUEST_MS, HTTP_REQUEST_TOTAL};

use super::error::RequestError;

const SOURCE: &str = "infra::http::client";

/// Authenticated client bound to one API base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    auth: HeaderValue,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, RequestError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| RequestError::InvalidToken)?;
        auth.set_sensitive(true);
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base, auth })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn auth_header(&self) -> &HeaderValue {
        &self.auth
    }

    pub fn url(&self, path: &str) -> Result<Url, RequestError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(RequestError::Url)
    }

    pub fn get(&self, path: &str) -> Result<ApiRequest<'_>, RequestError> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<ApiRequest<'_>, RequestError> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> Result<ApiRequest<'_>, RequestError> {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> Result<ApiRequest<'_>, RequestError> {
        self.request(Method::DELETE, path)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<ApiRequest<'_>, RequestError> {
        Ok(ApiRequest {
            api: self,
            method,
            url: self.url(path)?,
            body: None,
        })
    }
}

/// A request under construction. Consumed by [`ApiRequest::send`] or
/// [`ApiRequest::send_unit`].
#[derive(Debug)]
pub struct ApiRequest<'a> {
    api: &'a ApiClient,
    method: Method,
    url: Url,
    body: Option<serde_json::Value>,
}

impl ApiRequest<'_> {
    /// Append one url-encoded query pair.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(key, &value.to_string());
        self
    }

    /// Append a query pair only when `value` is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_value(body).map_err(RequestError::Encode)?);
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send and decode a JSON response body.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        let response = self.execute().await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(RequestError::Decode)
    }

    /// Send and discard the response body, accepting `204` and empty bodies.
    pub async fn send_unit(self) -> Result<(), RequestError> {
        self.execute().await.map(drop)
    }

    async fn execute(self) -> Result<Response, RequestError> {
        let Self {
            api,
            method,
            url,
            body,
        } = self;

        let mut request = api
            .client
            .request(method.clone(), url.clone())
            .header(reqwest::header::AUTHORIZATION, api.auth.clone());
        if let Some(body) = body.as_ref() {
            request = request.json(body);
        }

        let started = Instant::now();
        let result = request.send().await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!(HTTP_REQUEST_MS, "method" => method.to_string()).record(elapsed_ms);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                counter!(HTTP_REQUEST_TOTAL, "method" => method.to_string(), "outcome" => "transport")
                    .increment(1);
                warn!(
                    target = SOURCE,
                    method = %method,
                    url = %url,
                    error = %err,
                    "request failed before a response arrived"
                );
                return Err(RequestError::Transport(err));
            }
        };

        let status = response.status();
        debug!(
            target = SOURCE,
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms,
            "admin api request completed"
        );

        if status.is_success() {
            counter!(HTTP_REQUEST_TOTAL, "method" => method.to_string(), "outcome" => "success")
                .increment(1);
            return Ok(response);
        }

        counter!(HTTP_REQUEST_TOTAL, "method" => method.to_string(), "outcome" => "error")
            .increment(1);
        let bytes = response.bytes().await?;
        Err(RequestError::from_response(status, &bytes))
    }
}
