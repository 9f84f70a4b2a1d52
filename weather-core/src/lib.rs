//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration, resolved once at startup
//! - The upstream client for the OpenWeather current-weather endpoint
//! - Mapping of provider documents into `WeatherReport`
//! - Failure classification and the `getWeather` query handler
//!
//! It is used by `weather-gateway`, which exposes the query over GraphQL
//! and from the command line.

pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod query;

pub use config::{ApiKey, Config, FileConfig, RunMode};
pub use error::{FetchError, MappingError, UpstreamFailure, WeatherError, classify};
pub use mapper::map_response;
pub use model::WeatherReport;
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use query::WeatherService;
