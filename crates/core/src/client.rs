//! Shared HTTP client.
//!
//! One `ApiClient` is built at process start from a [`ClientConfig`] and cloned into every
//! service. Cloning is cheap: `reqwest::Client` is reference counted internally, so all clones
//! share one connection pool and one timeout policy.

use crate::config::ClientConfig;
use crate::{ClientError, ClientResult};
use api_shared::{Envelope, HealthRes};
use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    log_bodies: bool,
}

impl ApiClient {
    /// Build the shared client.
    ///
    /// The configured timeout bounds both connecting and the whole request.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ClientBuild` if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url().clone(),
            log_bodies: config.log_bodies(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint path {path:?}: {e}")))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.http.get(self.url(path)?);
        let body = self.execute("GET", path, request).await?;
        decode(path, &body)
    }

    /// GET with query parameters taken from a serializable struct.
    pub async fn get_json_with<Q, T>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.get(self.url(path)?).query(query);
        let body = self.execute("GET", path, request).await?;
        decode(path, &body)
    }

    /// POST a form-encoded body and decode the JSON response.
    pub async fn post_form<F, T>(&self, path: &str, form: &F) -> ClientResult<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.post_form_text(path, form).await?;
        decode(path, &body)
    }

    /// POST a form-encoded body and return the raw response text.
    pub async fn post_form_text<F>(&self, path: &str, form: &F) -> ClientResult<String>
    where
        F: Serialize + ?Sized,
    {
        self.trace_request(path, form);
        let request = self.http.post(self.url(path)?).form(form);
        self.execute("POST", path, request).await
    }

    /// POST a form-encoded body to an endpoint whose answer carries no data.
    ///
    /// Any 2xx answer counts as success, except a body that decodes as an [`Envelope`] with
    /// `success=false`, which becomes `ClientError::Rejected`.
    pub async fn post_form_unit<F>(&self, path: &str, form: &F) -> ClientResult<()>
    where
        F: Serialize + ?Sized,
    {
        let body = self.post_form_text(path, form).await?;
        match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => confirm(envelope).map(|_| ()),
            Err(_) => Ok(()),
        }
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.trace_request(path, body);
        let request = self.http.post(self.url(path)?).json(body);
        let text = self.execute("POST", path, request).await?;
        decode(path, &text)
    }

    /// Turn an image path from a record into something a viewer can load.
    ///
    /// Absolute `http(s)` URLs pass through untouched; anything else is joined to the base URL.
    /// Blank paths yield `None`.
    pub fn resolve_asset_url(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .ok()
            .map(String::from)
    }

    /// Probe `/health` on the backend host.
    pub async fn health(&self) -> ClientResult<HealthRes> {
        self.get_json("/health").await
    }

    async fn execute(
        &self,
        method: &'static str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ClientResult<String> {
        let started = Instant::now();

        let response = request.send().await.map_err(|source| {
            tracing::warn!(method, endpoint, error = %source, "request failed");
            ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        tracing::debug!(
            method,
            endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        if self.log_bodies {
            tracing::trace!(endpoint, body = %body, "response body");
        }

        if !status.is_success() {
            return Err(ClientError::Server {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    fn trace_request<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) {
        if !self.log_bodies {
            return;
        }
        match serde_json::to_string(body) {
            Ok(json) => tracing::trace!(endpoint, body = %json, "request body"),
            Err(e) => tracing::trace!(endpoint, error = %e, "request body not printable"),
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|source| ClientError::Parse {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Treat a `success=false` envelope as a failure carrying the backend's message.
pub fn confirm(envelope: Envelope) -> ClientResult<Envelope> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ClientError::Rejected(envelope.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn client() -> ApiClient {
        let config = ClientConfig::new(
            "https://example.test/mevabe_api/",
            Duration::from_secs(5),
            false,
            PathBuf::from("unused"),
        )
        .unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_asset_url_joins_relative_paths() {
        let client = client();
        assert_eq!(
            client.resolve_asset_url("images/week12.png").as_deref(),
            Some("https://example.test/mevabe_api/images/week12.png")
        );
        assert_eq!(
            client.resolve_asset_url("/images/week12.png").as_deref(),
            Some("https://example.test/mevabe_api/images/week12.png")
        );
    }

    #[test]
    fn test_resolve_asset_url_keeps_absolute_urls() {
        let client = client();
        assert_eq!(
            client.resolve_asset_url("https://cdn.test/a.png").as_deref(),
            Some("https://cdn.test/a.png")
        );
        assert_eq!(client.resolve_asset_url("  "), None);
    }

    #[test]
    fn test_confirm_rejects_failed_envelope() {
        let err = confirm(Envelope::failed("Không tìm thấy")).unwrap_err();
        assert!(matches!(err, ClientError::Rejected(m) if m == "Không tìm thấy"));
        assert!(confirm(Envelope::ok("")).is_ok());
    }

    #[test]
    fn test_decode_failure_is_parse_error() {
        let result: ClientResult<Vec<u32>> = decode("vitamins.php", "<html>");
        assert!(matches!(result, Err(ClientError::Parse { .. })));
    }
}
