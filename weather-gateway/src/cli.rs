use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_core::{Config, FileConfig, WeatherReport, WeatherService};

use crate::server;

const SUGGESTED_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-gateway", version, about = "GraphQL weather gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (GraphQL API and static pages).
    Serve {
        /// Listen port; overrides PORT and the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show current weather for a city.
    Show {
        /// City name, forwarded to the provider as-is.
        city: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Store the provider base URL and API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Serve { port } => {
                let mut config = Config::load()?;
                if let Some(port) = port {
                    config.port = port;
                }
                let service = WeatherService::from_config(&config)?;
                server::serve(config, service).await
            }
            Command::Show { city, json } => {
                let config = Config::load()?;
                let service = WeatherService::from_config(&config)?;
                let report = service.get_weather(&city).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", format_report(&report));
                }
                Ok(())
            }
            Command::Configure => configure(),
        }
    }
}

fn configure() -> Result<()> {
    let mut file = FileConfig::load()?;

    let default_url = file.base_url.clone().unwrap_or_else(|| SUGGESTED_BASE_URL.to_string());
    let base_url = Text::new("OpenWeather base URL:")
        .with_default(&default_url)
        .prompt()
        .context("Failed to read base URL")?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    file.base_url = Some(base_url);
    file.api_key = Some(api_key);

    let path = file.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn format_report(report: &WeatherReport) -> String {
    format!(
        "{city}, {country}: {description}\n\
         Temperature: {temp:.1}°C (feels like {feels:.1}°C, min {min:.1}°C, max {max:.1}°C)\n\
         Humidity: {humidity}%  Pressure: {pressure} hPa  Clouds: {clouds}%\n\
         Wind: {wind:.1} m/s at {deg}°  Rain (1h): {rain:.1} mm\n\
         Sunrise: {sunrise}  Sunset: {sunset}\n",
        city = report.city,
        country = report.country,
        description = report.description,
        temp = report.temperature,
        feels = report.feels_like,
        min = report.temp_min,
        max = report.temp_max,
        humidity = report.humidity,
        pressure = report.pressure,
        clouds = report.cloud_coverage,
        wind = report.wind_speed,
        deg = report.wind_degree,
        rain = report.rain_volume,
        sunrise = local_time(report.sunrise),
        sunset = local_time(report.sunset),
    )
}

fn local_time(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
