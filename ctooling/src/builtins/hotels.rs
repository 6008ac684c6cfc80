//! Hotel recommendation tool.
//!
//! No hotel vendor integration is wired up; the tool answers with curated
//! booking guidance the way the reference deployment does, echoing any
//! dates and party details the model supplied.

use cprovider::ToolDefinition;

use crate::args::{optional_string, parse_object, required_string};
use crate::{Tool, ToolContext, ToolError, ToolFuture};

#[derive(Debug, Default)]
pub struct HotelSearchTool;

impl HotelSearchTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for HotelSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "searchHotels".to_string(),
            description: "Search for hotels, accommodations, and their availability. Use this \
                          when users ask about hotels, accommodations, or places to stay."
                .to_string(),
            parameters: r#"{"type":"object","properties":{"location":{"type":"string","description":"City, location, or hotel name to search for (e.g., \"New York\", \"Paris\", \"Times Square\")"},"checkin_date":{"type":"string","description":"Check-in date in YYYY-MM-DD format (e.g., \"2025-10-15\")"},"checkout_date":{"type":"string","description":"Check-out date in YYYY-MM-DD format (e.g., \"2025-10-17\")"},"adults":{"type":"string","description":"Number of adult guests","default":"2"},"rooms":{"type":"string","description":"Number of rooms needed","default":"1"}},"required":["location"]}"#.to_string(),
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
            let checkin = optional_string(&args, "checkin_date");
            let checkout = optional_string(&args, "checkout_date");
            let adults = optional_string(&args, "adults").unwrap_or_else(|| "2".to_string());
            let rooms = optional_string(&args, "rooms").unwrap_or_else(|| "1".to_string());

            tracing::info!(
                phase = "tooling",
                event = "hotel_search",
                location = %location,
                has_dates = checkin.is_some() && checkout.is_some(),
            );

            Ok(format_hotel_guidance(
                &location,
                checkin.as_deref(),
                checkout.as_deref(),
                &adults,
                &rooms,
            ))
        })
    }
}

fn format_hotel_guidance(
    location: &str,
    checkin: Option<&str>,
    checkout: Option<&str>,
    adults: &str,
    rooms: &str,
) -> String {
    let mut formatted = format!(
        "I can help you search for hotels in {location}. Here are some popular booking sites \
         you can check:\n\n\
         **Recommended Hotel Booking Sites:**\n\
         - Booking.com - Wide selection and free cancellation\n\
         - Hotels.com - Loyalty rewards program\n\
         - Expedia - Package deals with flights\n\
         - Airbnb - Unique stays and apartments\n\
         - Agoda - Great for Asia-Pacific regions\n\n\
         **Search Tips:**\n\
         - Compare prices across multiple sites\n\
         - Check for free cancellation policies\n\
         - Read recent guest reviews\n\
         - Consider location vs. price\n\n"
    );

    match (checkin, checkout) {
        (Some(checkin), Some(checkout)) => {
            formatted.push_str(&format!(
                "**Your Search:** {location} from {checkin} to {checkout} for {adults} \
                 adult(s), {rooms} room(s)"
            ));
        }
        _ => {
            formatted.push_str(
                "**Tip:** Provide check-in and check-out dates for more specific results!",
            );
        }
    }

    formatted
}
