use anyhow::Result;
use tracing::error;

use crate::{
    config::Config,
    error::{FetchError, UpstreamFailure, WeatherError, classify},
    mapper::map_response,
    model::WeatherReport,
    provider::{OpenWeatherProvider, WeatherProvider},
};

/// Runs `getWeather`: provider call, then mapping, then classification of
/// any failure. Stateless; each call is independent.
#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Service backed by OpenWeather, configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Box::new(OpenWeatherProvider::new(config)?)))
    }

    pub async fn get_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.try_get_weather(city).await.map_err(|failure| {
            error!(city, error = %failure, "weather query failed");
            classify(&failure, city)
        })
    }

    async fn try_get_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        if city.trim().is_empty() {
            return Err(UpstreamFailure::Client("city must not be empty".into()).into());
        }

        let raw = self.provider.fetch_weather(city).await?;
        Ok(map_response(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_MESSAGE;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// Canned provider: returns the same outcome for every city.
    #[derive(Debug)]
    struct StubProvider {
        outcome: fn() -> Result<Value, UpstreamFailure>,
        calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        fn service(
            outcome: fn() -> Result<Value, UpstreamFailure>,
        ) -> (WeatherService, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let stub = StubProvider { outcome, calls: Arc::clone(&calls) };
            (WeatherService::new(Box::new(stub)), calls)
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_weather(&self, _city: &str) -> Result<Value, UpstreamFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn london() -> Result<Value, UpstreamFailure> {
        Ok(json!({
            "name": "London",
            "main": {
                "temp": 15.0, "feels_like": 14.0, "temp_min": 13.0, "temp_max": 16.0,
                "pressure": 1012, "humidity": 80
            },
            "weather": [{ "description": "cloudy" }],
            "wind": { "speed": 3.1, "deg": 200 },
            "clouds": { "all": 75 },
            "sys": { "sunrise": 1700000000, "sunset": 1700030000, "country": "GB" }
        }))
    }

    #[tokio::test]
    async fn returns_mapped_report() {
        let (service, calls) = StubProvider::service(london);

        let report = service.get_weather("London").await.unwrap();

        assert_eq!(report.city, "London");
        assert_eq!(report.temperature, 15.0);
        assert_eq!(report.rain_volume, 0.0);
        assert_eq!(report.country, "GB");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_carries_requested_city() {
        let (service, _) = StubProvider::service(|| {
            Err(UpstreamFailure::Http { status: 404, body: "city not found".into() })
        });

        let err = service.get_weather("Atlantis").await.unwrap_err();
        assert_eq!(err.to_string(), "City \"Atlantis\" not found.");
    }

    #[tokio::test]
    async fn server_errors_are_generic() {
        let (service, _) = StubProvider::service(|| {
            Err(UpstreamFailure::Http { status: 503, body: "maintenance".into() })
        });

        let err = service.get_weather("London").await.unwrap_err();
        assert_eq!(err, WeatherError::Generic);
        assert_eq!(err.to_string(), GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn timeout_is_generic() {
        let (service, _) = StubProvider::service(|| {
            Err(UpstreamFailure::Unreachable("operation timed out".into()))
        });

        let err = service.get_weather("London").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to fetch weather data. Please check the city name or API key."
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_generic() {
        let (service, _) = StubProvider::service(|| Ok(json!({ "name": "London" })));

        let err = service.get_weather("London").await.unwrap_err();
        assert_eq!(err, WeatherError::Generic);
    }

    #[tokio::test]
    async fn empty_city_is_rejected_without_calling_provider() {
        let (service, calls) = StubProvider::service(london);

        let err = service.get_weather("   ").await.unwrap_err();

        assert_eq!(err, WeatherError::Generic);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
