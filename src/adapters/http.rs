use crate::domain::ports::ConfigProvider;
use crate::domain::warnings::Warnings;
use crate::utils::error::{PolicyError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const WARNINGS_HEADER: &str = "X-Cf-Warnings";

/// Authenticated JSON transport shared by the directory and policy clients.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiTransport {
    pub fn new(base_url: &str, access_token: Option<&str>, timeout_seconds: u64) -> Result<Self> {
        Self::with_tls(base_url, access_token, timeout_seconds, false)
    }

    pub fn with_tls(
        base_url: &str,
        access_token: Option<&str>,
        timeout_seconds: u64,
        skip_ssl_validation: bool,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .danger_accept_invalid_certs(skip_ssl_validation)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.map(str::to_string),
        })
    }

    pub fn api<C: ConfigProvider>(config: &C, skip_ssl_validation: bool) -> Result<Self> {
        Self::with_tls(
            config.api_endpoint(),
            config.access_token(),
            config.timeout_seconds(),
            skip_ssl_validation,
        )
    }

    pub fn networking<C: ConfigProvider>(config: &C, skip_ssl_validation: bool) -> Result<Self> {
        Self::with_tls(
            config.networking_endpoint(),
            config.access_token(),
            config.timeout_seconds(),
            skip_ssl_validation,
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, format!("bearer {}", token)),
            None => builder,
        }
    }

    /// Sends the request and returns the body with any server warnings.
    pub async fn send(&self, builder: RequestBuilder, url: &str) -> Result<(String, Warnings)> {
        tracing::debug!("Requesting {}", url);
        let response = builder.send().await?;
        let status = response.status();
        let warnings = warnings_from_headers(response.headers());
        let body = response.text().await?;

        tracing::debug!("Response status from {}: {}", url, status);

        if !status.is_success() {
            return Err(PolicyError::UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok((body, warnings))
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
        warnings: &mut Warnings,
    ) -> Result<T> {
        let (body, received) = self.send(builder, url).await?;
        warnings.extend(received);
        Ok(serde_json::from_str(&body)?)
    }
}

/// Warnings arrive comma separated and query-escaped in a single header.
pub fn warnings_from_headers(headers: &HeaderMap) -> Warnings {
    let mut warnings = Warnings::new();
    for value in headers.get_all(WARNINGS_HEADER) {
        let Ok(raw) = value.to_str() else {
            tracing::warn!("Ignoring non-text {} header", WARNINGS_HEADER);
            continue;
        };
        for warning in raw.split(',') {
            let decoded = decode_warning(warning.trim());
            if !decoded.is_empty() {
                warnings.push(decoded);
            }
        }
    }
    warnings
}

fn decode_warning(warning: &str) -> String {
    url::form_urlencoded::parse(warning.as_bytes())
        .map(|(key, value)| {
            if value.is_empty() {
                key.into_owned()
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
