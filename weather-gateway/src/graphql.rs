use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};
use weather_core::{RunMode, WeatherReport, WeatherService};

pub type WeatherSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Current conditions for `city`, in metric units.
    async fn get_weather(
        &self,
        ctx: &Context<'_>,
        city: String,
    ) -> async_graphql::Result<Option<WeatherReport>> {
        let service = ctx.data::<WeatherService>()?;
        let report = service
            .get_weather(&city)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(Some(report))
    }
}

/// Introspection is only available in development.
pub fn build_schema(service: WeatherService, mode: RunMode) -> WeatherSchema {
    let builder = Schema::build(QueryRoot, EmptyMutation, EmptySubscription).data(service);

    if mode.is_development() {
        builder.finish()
    } else {
        builder.disable_introspection().finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use weather_core::{UpstreamFailure, WeatherProvider};

    #[derive(Debug)]
    struct FixedProvider(fn() -> Result<Value, UpstreamFailure>);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn fetch_weather(&self, _city: &str) -> Result<Value, UpstreamFailure> {
            (self.0)()
        }
    }

    fn schema(outcome: fn() -> Result<Value, UpstreamFailure>, mode: RunMode) -> WeatherSchema {
        build_schema(WeatherService::new(Box::new(FixedProvider(outcome))), mode)
    }

    fn paris() -> Result<Value, UpstreamFailure> {
        Ok(json!({
            "name": "Paris",
            "main": {
                "temp": 21.5, "feels_like": 21.0, "temp_min": 19.0, "temp_max": 23.0,
                "pressure": 1018, "humidity": 55
            },
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 2.0, "deg": 90 },
            "rain": { "1h": 0.4 },
            "clouds": { "all": 0 },
            "sys": { "sunrise": 1700001000, "sunset": 1700035000, "country": "FR" }
        }))
    }

    #[tokio::test]
    async fn get_weather_exposes_camel_case_fields() {
        let schema = schema(paris, RunMode::Production);

        let res = schema
            .execute(
                r#"{ getWeather(city: "Paris") {
                    city temperature feelsLike tempMin tempMax pressure humidity description
                    windSpeed windDegree rainVolume cloudCoverage sunrise sunset country
                } }"#,
            )
            .await;

        assert!(res.errors.is_empty(), "{:?}", res.errors);
        let data = res.data.into_json().unwrap();
        assert_eq!(
            data,
            json!({ "getWeather": {
                "city": "Paris", "temperature": 21.5, "feelsLike": 21.0, "tempMin": 19.0,
                "tempMax": 23.0, "pressure": 1018, "humidity": 55, "description": "clear sky",
                "windSpeed": 2.0, "windDegree": 90, "rainVolume": 0.4, "cloudCoverage": 0,
                "sunrise": 1700001000, "sunset": 1700035000, "country": "FR"
            }})
        );
    }

    #[tokio::test]
    async fn not_found_is_reported_as_graphql_error() {
        let schema = schema(
            || Err(UpstreamFailure::Http { status: 404, body: "city not found".into() }),
            RunMode::Production,
        );

        let res = schema.execute(r#"{ getWeather(city: "Atlantis") { city } }"#).await;

        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].message, "City \"Atlantis\" not found.");
        assert_eq!(res.data.into_json().unwrap(), json!({ "getWeather": null }));
    }

    #[tokio::test]
    async fn city_argument_is_required() {
        let schema = schema(paris, RunMode::Production);

        let res = schema.execute("{ getWeather { city } }").await;
        assert!(!res.errors.is_empty());
    }

    #[tokio::test]
    async fn introspection_only_in_development() {
        let query = "{ __schema { queryType { name } } }";

        let dev = schema(paris, RunMode::Development).execute(query).await;
        assert!(dev.errors.is_empty());

        let prod = schema(paris, RunMode::Production).execute(query).await;
        let data = prod.data.into_json().unwrap();
        assert!(!prod.errors.is_empty() || data["__schema"].is_null());
    }
}
