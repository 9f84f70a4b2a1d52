use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Current conditions for one city, built fresh for every query.
///
/// Temperatures are in °C because the provider is always asked for metric
/// units. `sunrise` and `sunset` are Unix timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "Weather")]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    pub description: String,
    pub wind_speed: f64,
    pub wind_degree: i32,
    /// Last-hour rain accumulation in mm, 0 when the provider omits it.
    pub rain_volume: f64,
    pub cloud_coverage: i32,
    pub sunrise: i64,
    pub sunset: i64,
    pub country: String,
}
