//! Runtime wiring helpers from configuration to a ready chat service.

use std::sync::Arc;

use cchat::ChatService;
use cprovider::GatewayError;
use cprovider::groq::GroqGateway;
use ctooling::builtins::{FlightSearchTool, HotelSearchTool, WeatherTool, WebSearchTool};
use ctooling::{ToolExecutor, ToolRegistry};

use crate::ConciergeConfig;

/// Registers every built-in tool whose vendor key is configured.
///
/// Hotels have no vendor dependency and are always available.
pub fn tool_registry(config: &ConciergeConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    if let Some(key) = &config.tavily_api_key {
        registry.register(
            WebSearchTool::new(key.clone()).with_max_results(config.max_search_results),
        );
    }

    if let Some(key) = &config.openweather_api_key {
        registry.register(WeatherTool::new(key.clone()));
    }

    if let Some(key) = &config.aviationstack_api_key {
        registry.register(FlightSearchTool::new(key.clone()));
    }

    registry.register(HotelSearchTool::new());

    tracing::info!(
        phase = "runtime",
        event = "tools_registered",
        tool_count = registry.len(),
    );

    registry
}

/// Builds the full chat service: Groq gateway, tool executor, and
/// conversation store wired together from one configuration.
pub fn chat_service(config: &ConciergeConfig) -> Result<ChatService, GatewayError> {
    let gateway = GroqGateway::over_http(config.groq_api_key.clone())?
        .with_fallback_model(config.model.clone())
        .with_settings(config.settings.clone());

    let executor = ToolExecutor::new(Arc::new(tool_registry(config)))
        .with_worker_limit(config.tool_worker_limit)
        .with_call_timeout(config.tool_call_timeout);

    Ok(ChatService::builder(Arc::new(gateway), Arc::new(executor))
        .model(config.model.clone())
        .build())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cprovider::{GenerationSettings, SecretString};

    use super::*;

    fn config_with_keys(search: bool, weather: bool, flights: bool) -> ConciergeConfig {
        ConciergeConfig {
            groq_api_key: SecretString::new("gsk_test"),
            tavily_api_key: search.then(|| SecretString::new("tvly_test")),
            openweather_api_key: weather.then(|| SecretString::new("owm_test")),
            aviationstack_api_key: flights.then(|| SecretString::new("avs_test")),
            model: "llama-3.3-70b-versatile".to_string(),
            settings: GenerationSettings::default(),
            max_search_results: 5,
            tool_worker_limit: 4,
            tool_call_timeout: Duration::from_secs(10),
            session_max_idle: Duration::from_secs(24 * 60 * 60),
        }
    }

    #[test]
    fn registry_gates_tools_on_configured_keys() {
        let all = tool_registry(&config_with_keys(true, true, true));
        assert_eq!(all.len(), 4);
        assert!(all.contains("webSearch"));
        assert!(all.contains("getWeather"));
        assert!(all.contains("searchFlights"));
        assert!(all.contains("searchHotels"));

        let minimal = tool_registry(&config_with_keys(false, false, false));
        assert_eq!(minimal.len(), 1);
        assert!(minimal.contains("searchHotels"));
    }

    #[test]
    fn chat_service_builds_from_configuration() {
        let service = chat_service(&config_with_keys(true, false, false))
            .expect("service should build");
        assert!(service.store().is_empty());
    }
}
