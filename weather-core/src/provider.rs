use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::UpstreamFailure;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of raw current-weather documents.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One outbound call for `city`. No retries.
    async fn fetch_weather(&self, city: &str) -> Result<Value, UpstreamFailure>;
}
