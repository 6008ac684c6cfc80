//! Current-weather tool backed by the OpenWeather API.

use serde::Deserialize;

use cprovider::{SecretString, ToolDefinition};

use crate::args::{optional_string, parse_object, required_string};
use crate::{Tool, ToolContext, ToolError, ToolFuture};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Units {
    Metric,
    Imperial,
    Kelvin,
}

impl Units {
    fn parse(value: Option<&str>) -> Result<Self, ToolError> {
        match value {
            None | Some("metric") => Ok(Self::Metric),
            Some("imperial") => Ok(Self::Imperial),
            Some("kelvin") => Ok(Self::Kelvin),
            Some(other) => Err(ToolError::invalid_arguments(format!(
                "units must be one of metric, imperial, kelvin (got '{other}')"
            ))),
        }
    }

    fn query_value(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Kelvin => "standard",
        }
    }

    fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Kelvin => "K",
        }
    }

    fn speed_unit(self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            _ => "m/s",
        }
    }
}

pub struct WeatherTool {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl WeatherTool {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn current_weather(&self, location: &str, units: Units) -> Result<String, ToolError> {
        let url = format!("{}/weather", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.expose()),
                ("units", units.query_value()),
            ])
            .send()
            .await
            .map_err(|err| ToolError::provider(format!("weather lookup failed: {err}")))?;

        let status = response.status();
        if status.as_u16() == 404 {
            // Unknown place names come back as a polite reply, not a failure.
            return Ok(format!(
                "Sorry, I couldn't find weather information for \"{location}\". \
                 Please check the location name and try again."
            ));
        }

        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => "weather service authentication failed".to_string(),
                429 => "weather rate limit exceeded".to_string(),
                code => format!("weather service returned status {code}"),
            };

            return Err(ToolError::provider(message).with_tool_name("getWeather"));
        }

        let parsed: WeatherApiResponse = response
            .json()
            .await
            .map_err(|err| ToolError::provider(format!("unreadable weather response: {err}")))?;

        Ok(format_weather(&parsed, units))
    }
}

impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "getWeather".to_string(),
            description: "Get current weather information for a specific location. Use this \
                          when users ask about weather, temperature, or weather conditions."
                .to_string(),
            parameters: r#"{"type":"object","properties":{"location":{"type":"string","description":"The city name, state, and/or country (e.g., \"New York, NY\", \"London, UK\", \"Tokyo\")"},"units":{"type":"string","description":"Temperature units","enum":["metric","imperial","kelvin"],"default":"metric"}},"required":["location"]}"#.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        _context: &'a ToolContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let args = parse_object(args_json)?;
            let location = required_string(&args, "location")?;
            let units = Units::parse(optional_string(&args, "units").as_deref())?;

            tracing::info!(
                phase = "tooling",
                event = "weather_lookup",
                location = %location,
                units = units.query_value(),
            );

            self.current_weather(&location, units).await
        })
    }
}

fn format_weather(data: &WeatherApiResponse, units: Units) -> String {
    let location = match &data.sys {
        Some(sys) => format!("{}, {}", data.name, sys.country),
        None => data.name.clone(),
    };

    let description = data
        .weather
        .first()
        .map(|entry| entry.description.as_str())
        .unwrap_or("unknown");

    let wind_speed = data.wind.as_ref().map_or(0.0, |wind| wind.speed);
    let visibility = data
        .visibility
        .map(|meters| format!("{:.1}", f64::from(meters) / 1000.0))
        .unwrap_or_else(|| "N/A".to_string());

    let symbol = units.temperature_symbol();
    format!(
        "Current weather in {location}:\n\
         Temperature: {}{symbol} (feels like {}{symbol})\n\
         Conditions: {description}\n\
         Humidity: {}%\n\
         Wind: {wind_speed} {}\n\
         Visibility: {visibility} km\n\
         Pressure: {} hPa",
        data.main.temp.round(),
        data.main.feels_like.round(),
        data.main.humidity,
        units.speed_unit(),
        data.main.pressure,
    )
}

#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    name: String,
    sys: Option<WeatherApiSys>,
    main: WeatherApiMain,
    #[serde(default)]
    weather: Vec<WeatherApiCondition>,
    wind: Option<WeatherApiWind>,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WeatherApiSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct WeatherApiMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherApiCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherApiWind {
    speed: f64,
}
