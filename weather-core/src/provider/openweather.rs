use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{ApiKey, Config},
    error::UpstreamFailure,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: ApiKey,
    base_url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    fn build_request(&self, city: &str) -> Result<reqwest::Request, reqwest::Error> {
        self.http
            .get(self.base_url.clone())
            .query(&[
                ("q", city),
                ("appid", self.api_key.expose()),
                ("units", "metric"),
            ])
            .build()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<Value, UpstreamFailure> {
        info!(city, "requesting current weather");

        let request = self
            .build_request(city)
            .map_err(|e| UpstreamFailure::Client(e.to_string()))?;
        debug!(url = %redact_url(request.url()), "OpenWeather request");

        let res = self.http.execute(request).await.map_err(send_failure)?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| UpstreamFailure::Unreachable(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "OpenWeather error response");
            return Err(UpstreamFailure::Http {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        debug!(body = %truncate_body(&body), "OpenWeather response");

        serde_json::from_str(&body).map_err(|e| UpstreamFailure::Decode(e.to_string()))
    }
}

fn send_failure(err: reqwest::Error) -> UpstreamFailure {
    // Errors from reqwest carry the full URL, including the key.
    let err = err.without_url();
    if err.is_builder() {
        UpstreamFailure::Client(err.to_string())
    } else {
        UpstreamFailure::Unreachable(err.to_string())
    }
}

/// Copy of `url` with the `appid` value masked, for logging.
pub(crate) fn redact_url(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
