//! Translation of the OpenWeather "current weather" document into
//! [`WeatherReport`]. Pure: no I/O, no logging.

use serde::Deserialize;
use serde_json::Value;

use crate::{error::MappingError, model::WeatherReport};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: i32,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    rain: Option<OwRain>,
    clouds: OwClouds,
    sys: OwSys,
}

/// Every field is required except `rain.1h`, which defaults to 0.
pub fn map_response(raw: &Value) -> Result<WeatherReport, MappingError> {
    let parsed = OwCurrentResponse::deserialize(raw)?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(MappingError::MissingCondition)?;

    let rain_volume = parsed.rain.and_then(|r| r.one_hour).unwrap_or(0.0);

    Ok(WeatherReport {
        city: parsed.name,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        temp_min: parsed.main.temp_min,
        temp_max: parsed.main.temp_max,
        pressure: parsed.main.pressure,
        humidity: parsed.main.humidity,
        description,
        wind_speed: parsed.wind.speed,
        wind_degree: parsed.wind.deg,
        rain_volume,
        cloud_coverage: parsed.clouds.all,
        sunrise: parsed.sys.sunrise,
        sunset: parsed.sys.sunset,
        country: parsed.sys.country,
    })
}
