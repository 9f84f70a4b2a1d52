//! Failure types for a weather query.
//!
//! Internal failures (`UpstreamFailure`, `MappingError`) carry the detail
//! needed for server-side logs. `classify` collapses them into the two
//! user-facing `WeatherError` categories, which are the only errors that
//! leave the query handler.

use thiserror::Error;

/// Message shown for every failure other than an unknown city.
pub const GENERIC_MESSAGE: &str =
    "Unable to fetch weather data. Please check the city name or API key.";

/// How the outbound provider call failed.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// Provider answered with a non-2xx status.
    #[error("provider responded with status {status}: {body}")]
    Http { status: u16, body: String },

    /// No response: connect error, DNS failure or timeout.
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The request could not be built or sent.
    #[error("request could not be sent: {0}")]
    Client(String),

    /// 2xx response whose body is not JSON.
    #[error("provider returned a non-JSON body: {0}")]
    Decode(String),
}

/// The provider document does not have the expected shape.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("unexpected provider payload: {0}")]
    Shape(String),

    #[error("provider payload has an empty `weather` list")]
    MissingCondition,
}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        MappingError::Shape(err.to_string())
    }
}

/// Outcome of one failed query attempt, before classification.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// User-facing query error. `Display` is the exact message returned to API
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("City \"{city}\" not found.")]
    NotFound { city: String },

    #[error("{}", GENERIC_MESSAGE)]
    Generic,
}

/// 404 from the provider is the only failure reported specifically.
pub fn classify(failure: &FetchError, city: &str) -> WeatherError {
    match failure {
        FetchError::Upstream(UpstreamFailure::Http { status: 404, .. }) => WeatherError::NotFound {
            city: city.to_string(),
        },
        _ => WeatherError::Generic,
    }
}
