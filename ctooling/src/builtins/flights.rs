//! Flight lookup tool backed by the AviationStack API.

use serde::Deserialize;

use cprovider::{SecretString, ToolDefinition};

use crate::args::{optional_string, parse_object, required_string};
use crate::{Tool, ToolContext, ToolError, ToolFuture};

pub const AVIATIONSTACK_BASE_URL: &str = "https://api.aviationstack.com/v1";

const MAX_FORMATTED_FLIGHTS: usize = 5;

pub struct FlightSearchTool {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl FlightSearchTool {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: AVIATIONSTACK_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn search(&self, query: &FlightQuery) -> Result<String, ToolError> {
        let url = format!("{}/flights", self.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("access_key".to_string(), self.api_key.expose().to_string()),
            ("limit".to_string(), "10".to_string()),
        ];

        match &query.flight_number {
            Some(flight_number) => {
                params.push(("flight_iata".to_string(), flight_number.clone()));
            }
            None => {
                params.push(("dep_iata".to_string(), query.departure.clone()));
                params.push(("arr_iata".to_string(), query.arrival.clone()));
                if let Some(date) = &query.date {
                    params.push(("flight_date".to_string(), date.clone()));
                }
            }
        }

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|err| ToolError::provider(format!("flight search failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => "flight search authentication failed".to_string(),
                429 => "flight search rate limit exceeded".to_string(),
                code => format!("flight search returned status {code}"),
            };

            return Err(ToolError::provider(message).with_tool_name("searchFlights"));
        }

        let parsed: FlightsApiResponse = response
            .json()
            .await
            .map_err(|err| ToolError::provider(format!("unreadable flight response: {err}")))?;

        Ok(format_flights(&parsed.data, query))
    }
}

impl Tool for FlightSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "searchFlights".to_string(),
            description: "Search for flight information, schedules, and prices. Use this when \
                          users ask about flights, flight status, or travel information."
                .to_string(),
            parameters: r#"{"type":"object","properties":{"departure":{"type":"string","description":"Departure airport code or city name (e.g., \"JFK\", \"New York\")"},"arrival":{"type":"string","description":"Arrival airport code or city name (e.g., \"LAX\", \"Los Angeles\")"},"date":{"type":"string","description":"Departure date in YYYY-MM-DD format (e.g., \"2025-10-15\")"},"flight_number":{"type":"string","description":"Specific flight number to check status (optional)"}},"required":["departure","arrival"]}"#.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        _context: &'a ToolContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let args = parse_object(args_json)?;
            let query = FlightQuery {
                departure: required_string(&args, "departure")?,
                arrival: required_string(&args, "arrival")?,
                date: optional_string(&args, "date"),
                flight_number: optional_string(&args, "flight_number"),
            };

            tracing::info!(
                phase = "tooling",
                event = "flight_search",
                route = %format!("{}-{}", query.departure, query.arrival),
                by_flight_number = query.flight_number.is_some(),
            );

            self.search(&query).await
        })
    }
}

struct FlightQuery {
    departure: String,
    arrival: String,
    date: Option<String>,
    flight_number: Option<String>,
}

fn format_flights(flights: &[FlightRecord], query: &FlightQuery) -> String {
    if flights.is_empty() {
        let suffix = query
            .date
            .as_ref()
            .map(|date| format!(" on {date}"))
            .unwrap_or_default();

        return format!(
            "No flights found for {} to {}{suffix}. Please check the airport codes and try again.",
            query.departure, query.arrival
        );
    }

    let mut formatted = format!(
        "Flight information for {} → {}:\n\n",
        query.departure, query.arrival
    );

    for (index, flight) in flights.iter().take(MAX_FORMATTED_FLIGHTS).enumerate() {
        let flight_number = flight
            .flight
            .as_ref()
            .and_then(|value| value.iata.as_deref())
            .unwrap_or("N/A");
        let airline = flight
            .airline
            .as_ref()
            .and_then(|value| value.name.as_deref())
            .unwrap_or("Unknown Airline");
        let status = flight.flight_status.as_deref().unwrap_or("Unknown");

        formatted.push_str(&format!("Flight {flight_number} - {airline}\n"));
        formatted.push_str(&format_endpoint("From", flight.departure.as_ref(), &query.departure));
        formatted.push_str(&format_endpoint("To", flight.arrival.as_ref(), &query.arrival));
        formatted.push_str(&format!("Status: {status}\n"));

        if index + 1 < flights.len().min(MAX_FORMATTED_FLIGHTS) {
            formatted.push_str("\n---\n\n");
        }
    }

    if flights.len() > MAX_FORMATTED_FLIGHTS {
        formatted.push_str(&format!(
            "\n\n... and {} more flights available.",
            flights.len() - MAX_FORMATTED_FLIGHTS
        ));
    }

    formatted
}

fn format_endpoint(label: &str, endpoint: Option<&FlightEndpoint>, fallback: &str) -> String {
    let airport = endpoint
        .and_then(|value| value.airport.as_deref())
        .unwrap_or(fallback);
    let scheduled = endpoint
        .and_then(|value| value.scheduled.as_deref())
        .unwrap_or("N/A");

    format!("{label}: {airport} at {scheduled}\n")
}

#[derive(Debug, Deserialize)]
struct FlightsApiResponse {
    #[serde(default)]
    data: Vec<FlightRecord>,
}

#[derive(Debug, Deserialize)]
struct FlightRecord {
    flight_status: Option<String>,
    flight: Option<FlightIdentity>,
    airline: Option<AirlineIdentity>,
    departure: Option<FlightEndpoint>,
    arrival: Option<FlightEndpoint>,
}

#[derive(Debug, Deserialize)]
struct FlightIdentity {
    iata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirlineIdentity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightEndpoint {
    airport: Option<String>,
    scheduled: Option<String>,
}
