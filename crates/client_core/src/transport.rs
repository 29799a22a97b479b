use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    envelope::Envelope,
    error::{ApiErrorBody, SuccessCodes},
};
use tracing::{debug, warn};

use crate::{
    config::{ClientSettings, ConfigError},
    error::{ServiceError, ServiceResult},
};

/// HTTP plumbing shared by every resource service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    base_url: String,
    token: Option<String>,
    verbose: bool,
}

impl ApiTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            verbose: false,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let base_url = settings.base_url()?;
        let mut builder = Client::builder();
        if let Some(seconds) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            token: settings.api_token.clone(),
            verbose: settings.app_env.verbose_logging(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ServiceResult<T> {
        self.log_request("GET", path);
        let request = self.authorize(self.http.get(self.url(path)));
        self.send(request, SuccessCodes::Standard, fallback).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, fallback: &str) -> ServiceResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.log_request("GET", path);
        let request = self.authorize(self.http.get(self.url(path)).query(query));
        self.send(request, SuccessCodes::Standard, fallback).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, fallback: &str) -> ServiceResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_accepting(path, body, SuccessCodes::Standard, fallback)
            .await
    }

    pub async fn post_accepting<T, B>(
        &self,
        path: &str,
        body: &B,
        codes: SuccessCodes,
        fallback: &str,
    ) -> ServiceResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.log_request("POST", path);
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        self.send(request, codes, fallback).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, fallback: &str) -> ServiceResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.log_request("PUT", path);
        let request = self.authorize(self.http.put(self.url(path)).json(body));
        self.send(request, SuccessCodes::Standard, fallback).await
    }

    /// PUT without a body, for action endpoints such as cancel.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ServiceResult<T> {
        self.log_request("PUT", path);
        let request = self.authorize(self.http.put(self.url(path)));
        self.send(request, SuccessCodes::Standard, fallback).await
    }

    pub async fn delete(&self, path: &str, fallback: &str) -> ServiceResult<()> {
        self.log_request("DELETE", path);
        let request = self.authorize(self.http.delete(self.url(path)));
        self.send::<serde::de::IgnoredAny>(request, SuccessCodes::Standard, fallback)
            .await
            .map(|_| ())
    }

    fn log_request(&self, method: &str, path: &str) {
        if self.verbose {
            debug!("api: request method={method} path={path}");
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        codes: SuccessCodes,
        fallback: &str,
    ) -> ServiceResult<T> {
        let response = request.send().await.map_err(|source| {
            warn!("api: transport failure: {source}");
            ServiceError::Transport {
                message: fallback.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ServiceError::Transport {
                message: fallback.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(http_error(status, &body, fallback));
        }

        let envelope: Envelope =
            serde_json::from_slice(&body).map_err(|source| ServiceError::Decode {
                message: fallback.to_string(),
                source,
            })?;
        unwrap_envelope(envelope, codes, fallback)
    }
}

/// Checks the envelope code and decodes `result` into the caller's type.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    envelope: Envelope,
    codes: SuccessCodes,
    fallback: &str,
) -> ServiceResult<T> {
    if !codes.accepts(envelope.code) {
        let message = envelope.message().unwrap_or(fallback).to_string();
        warn!("api: rejected code={} message={message}", envelope.code);
        let payload = serde_json::to_value(&envelope).unwrap_or_default();
        return Err(ServiceError::Rejected {
            code: envelope.code,
            message,
            payload,
        });
    }

    serde_json::from_value(envelope.result).map_err(|source| ServiceError::Decode {
        message: fallback.to_string(),
        source,
    })
}

pub(crate) fn http_error(status: StatusCode, body: &[u8], fallback: &str) -> ServiceError {
    let payload = serde_json::from_slice::<serde_json::Value>(body).ok();
    let message = payload
        .as_ref()
        .and_then(|value| serde_json::from_value::<ApiErrorBody>(value.clone()).ok())
        .and_then(|parsed| parsed.message().map(str::to_string))
        .unwrap_or_else(|| fallback.to_string());
    warn!("api: http status={} message={message}", status.as_u16());
    ServiceError::Http {
        status: status.as_u16(),
        message,
        payload,
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
