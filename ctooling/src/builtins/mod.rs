//! Ready-made tools for the concierge deployments.
//!
//! Each tool wraps one external vendor API (or, for hotels, curated
//! guidance) behind the [`Tool`](crate::Tool) trait so it can be dropped
//! into a [`ToolRegistry`](crate::ToolRegistry) alongside custom tools.

mod flights;
mod hotels;
mod search;
mod weather;

pub use flights::FlightSearchTool;
pub use hotels::HotelSearchTool;
pub use search::WebSearchTool;
pub use weather::WeatherTool;
