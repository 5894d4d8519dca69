use crate::models::tour_plan::TravelRequest;

const NOT_SPECIFIED: &str = "Not specified";

/// Renders the provider instruction for a trip request. All costs are
/// requested in ₹ regardless of the currency glyph the user typed; INR is
/// the single deployment currency and the display layer assumes it.
pub fn build_prompt(info: &TravelRequest) -> String {
    let destination = info.destination.as_deref().unwrap_or("[destination]");
    let duration = info.duration.as_deref().unwrap_or(NOT_SPECIFIED);
    let people = info
        .people
        .map(|n| n.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let budget = info.budget.as_deref().unwrap_or(NOT_SPECIFIED);
    let locations = if info.specific_locations.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        info.specific_locations.join(", ")
    };

    format!(
        r#"Create a detailed travel itinerary for a trip to {destination}.

Trip details:
- Duration: {duration}
- Number of people: {people}
- Budget: {budget} (all costs in ₹)
- Specific locations of interest: {locations}

Please provide a detailed travel plan with the following structure:
1. Day-by-day itinerary with specific activities and timings
2. Accommodation recommendations based on the budget (prices in ₹)
3. Transportation options and tips (costs in ₹)
4. Must-see attractions and local experiences
5. Estimated costs for major activities (in ₹)

Format your response as a JSON object with these exact properties:
{{
  "destination": "string",
  "duration": "string",
  "budget": "string (in ₹)",
  "people": number,
  "itinerary": [
    {{
      "day": "string (e.g., 'Day 1')",
      "activities": "string (comma-separated list of activities with costs in ₹)"
    }}
  ],
  "accommodations": "string (with costs in ₹)",
  "transportation": "string (with costs in ₹)"
}}"#
    )
}
