use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::models::tour_plan::{ItineraryDay, TourPlan, TravelRequest};
use crate::services::fallback_plan;

const DEFAULT_DESTINATION: &str = "Unknown destination";
const DEFAULT_FIELD: &str = "Not specified";
const DEFAULT_ACTIVITIES: &str = "Explore local attractions";
const DEFAULT_ACCOMMODATIONS: &str = "Standard accommodations based on availability";
const DEFAULT_TRANSPORTATION: &str = "Local transportation options";

/// Loosely-typed plan as the provider returns it. Every field is optional
/// and several accept more than one JSON shape; `coerce` squeezes this into
/// the canonical TourPlan.
#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    budget: Option<String>,
    #[serde(default)]
    people: Option<Value>,
    #[serde(default)]
    itinerary: Option<Value>,
    #[serde(default)]
    accommodations: Option<Value>,
    #[serde(default)]
    transportation: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    #[serde(default)]
    day: Option<Value>,
    #[serde(default)]
    activities: Option<ActivitiesField>,
}

/// The provider writes `activities` in whatever shape it fancies: a plain
/// string, a list of strings, a list of {time, activity} pairs, or a keyed
/// object. One flattening arm per variant; anything else is stringified.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActivitiesField {
    Text(String),
    Entries(Vec<ActivityEntry>),
    Keyed(serde_json::Map<String, Value>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActivityEntry {
    Text(String),
    Timed { time: String, activity: String },
    Other(Value),
}

impl ActivitiesField {
    fn flatten(self) -> String {
        match self {
            ActivitiesField::Text(text) => text,
            ActivitiesField::Entries(entries) => entries
                .into_iter()
                .map(ActivityEntry::flatten)
                .collect::<Vec<_>>()
                .join(", "),
            ActivitiesField::Keyed(map) => map
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value_text(value)))
                .collect::<Vec<_>>()
                .join(", "),
            ActivitiesField::Other(value) => value_text(&value),
        }
    }
}

impl ActivityEntry {
    fn flatten(self) -> String {
        match self {
            ActivityEntry::Text(text) => text,
            ActivityEntry::Timed { time, activity } => format!("{}: {}", time, activity),
            ActivityEntry::Other(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value_text(value)))
                .collect::<Vec<_>>()
                .join(", "),
            ActivityEntry::Other(value) => value_text(&value),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Turns whatever the provider sent back into a canonical TourPlan. Total:
/// malformed input degrades through span extraction, coercion, and finally
/// the fallback generator, but never errors.
pub fn normalize(raw_text: &str, request: &TravelRequest) -> TourPlan {
    // Direct parse of the whole reply.
    if let Ok(plan) = serde_json::from_str::<RawPlan>(raw_text) {
        return coerce(plan, raw_text, request);
    }

    // The widest {...} span inside the reply; providers love to wrap their
    // JSON in prose or code fences.
    if let Some(span) = widest_json_span(raw_text) {
        if let Ok(plan) = serde_json::from_str::<RawPlan>(span) {
            return coerce(plan, raw_text, request);
        }
    }

    // Nothing parseable: synthesize from the request, keeping any labeled
    // sections the raw text happens to carry.
    let mut plan = fallback_plan::generate_fallback_plan(request);
    if let Some(section) = extract_section(raw_text, "accommodations", "accommodation") {
        plan.accommodations = section;
    }
    if let Some(section) = extract_section(raw_text, "transportation", "transport") {
        plan.transportation = section;
    }
    plan
}

fn coerce(raw: RawPlan, raw_text: &str, request: &TravelRequest) -> TourPlan {
    let itinerary = match raw.itinerary {
        Some(Value::Array(days)) if !days.is_empty() => days
            .into_iter()
            .enumerate()
            .map(|(index, day)| coerce_day(day, index))
            .collect(),
        // Missing, empty, or not a sequence: mine the raw text instead.
        _ => fallback_plan::parse_itinerary_text(raw_text),
    };

    TourPlan {
        destination: nonempty(raw.destination)
            .or_else(|| request.destination.clone())
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        duration: nonempty(raw.duration)
            .or_else(|| request.duration.clone())
            .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        budget: nonempty(raw.budget)
            .or_else(|| request.budget.clone())
            .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        people: raw
            .people
            .as_ref()
            .and_then(coerce_people)
            .or(request.people)
            .unwrap_or(1),
        itinerary,
        accommodations: string_field(raw.accommodations, DEFAULT_ACCOMMODATIONS),
        transportation: string_field(raw.transportation, DEFAULT_TRANSPORTATION),
    }
}

fn coerce_day(value: Value, index: usize) -> ItineraryDay {
    let raw: RawDay = serde_json::from_value(value).unwrap_or(RawDay {
        day: None,
        activities: None,
    });

    let day = match raw.day {
        Some(Value::String(label)) if !label.trim().is_empty() => label,
        Some(Value::Number(n)) => format!("Day {}", n),
        _ => format!("Day {}", index + 1),
    };

    let activities = raw
        .activities
        .map(ActivitiesField::flatten)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_ACTIVITIES.to_string());

    ItineraryDay { day, activities }
}

/// People may come back as a number or a numeric string.
fn coerce_people(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
    .filter(|&n| n > 0)
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn string_field(value: Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => default.to_string(),
    }
}

fn widest_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Best-effort capture of a labeled section ("Accommodations: ...") up to
/// the next blank line.
fn extract_section(text: &str, label: &str, alt_label: &str) -> Option<String> {
    for name in [label, alt_label] {
        let pattern = format!(r"(?is){}[:\s]+(.+?)(?:\n\s*\n|\z)", regex::escape(name));
        let section_re = Regex::new(&pattern).expect("section pattern");
        if let Some(caps) = section_re.captures(text) {
            let section = caps[1].trim().to_string();
            if !section.is_empty() {
                return Some(section);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kerala_request() -> TravelRequest {
        TravelRequest {
            destination: Some("Kerala".to_string()),
            duration: Some("5 days".to_string()),
            people: Some(2),
            budget: Some("50k budget".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_direct_parse_of_clean_reply() {
        let reply = r#"{
            "destination": "Kerala",
            "duration": "5 days",
            "budget": "₹50,000",
            "people": 2,
            "itinerary": [
                {"day": "Day 1", "activities": "Fort Kochi and the Chinese fishing nets"},
                {"day": "Day 2", "activities": "Tea plantations in Munnar"}
            ],
            "accommodations": "Homestays in Kochi and Munnar (₹2,000-5,000 per night)",
            "transportation": "Private car with driver (₹2,500 per day)"
        }"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.destination, "Kerala");
        assert_eq!(plan.people, 2);
        assert_eq!(plan.itinerary.len(), 2);
        assert_eq!(
            plan.itinerary[1].activities,
            "Tea plantations in Munnar"
        );
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let reply = "Sure! Here is your plan:\n```json\n{\"destination\": \"Kerala\", \
                     \"itinerary\": [{\"day\": \"Day 1\", \"activities\": \"Backwater cruise\"}]}\n```\nEnjoy!";
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.destination, "Kerala");
        assert_eq!(plan.itinerary[0].activities, "Backwater cruise");
        // Scalars absent from the reply are backfilled from the request.
        assert_eq!(plan.duration, "5 days");
        assert_eq!(plan.budget, "50k budget");
    }

    #[test]
    fn test_timed_activity_entries_are_flattened() {
        let reply = r#"{
            "destination": "Kerala",
            "itinerary": [
                {"day": "Day 1", "activities": [
                    {"time": "Morning", "activity": "Fort Kochi walk"},
                    {"time": "Evening", "activity": "Kathakali performance"}
                ]}
            ]
        }"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(
            plan.itinerary[0].activities,
            "Morning: Fort Kochi walk, Evening: Kathakali performance"
        );
    }

    #[test]
    fn test_string_list_activities_are_joined() {
        let reply = r#"{"itinerary": [{"day": "Day 1", "activities": ["Beach", "Museum", "Dinner cruise"]}]}"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.itinerary[0].activities, "Beach, Museum, Dinner cruise");
    }

    #[test]
    fn test_keyed_object_activities_are_rendered_as_pairs() {
        let reply = r#"{"itinerary": [{"day": "Day 1", "activities": {"morning": "Harbor tour", "evening": "Night market"}}]}"#;
        let plan = normalize(reply, &kerala_request());
        // serde_json maps iterate in key order.
        assert_eq!(
            plan.itinerary[0].activities,
            "evening: Night market, morning: Harbor tour"
        );
    }

    #[test]
    fn test_non_sequence_itinerary_falls_back_to_text_scan() {
        let reply = r#"{"destination": "Kerala", "itinerary": "Day 1: explore the backwaters of Alleppey. Day 2: tea country around Munnar."}"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.itinerary.len(), 2);
        assert_eq!(plan.itinerary[0].day, "Day 1");
        assert!(plan.itinerary[0].activities.contains("backwaters"));
    }

    #[test]
    fn test_non_string_sections_replaced_with_defaults() {
        let reply = r#"{"destination": "Kerala", "accommodations": 42, "transportation": ["bus"],
                        "itinerary": [{"day": "Day 1", "activities": "Arrive"}]}"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.accommodations, DEFAULT_ACCOMMODATIONS);
        assert_eq!(plan.transportation, DEFAULT_TRANSPORTATION);
    }

    #[test]
    fn test_unparseable_text_degrades_to_fallback() {
        let plan = normalize("complete nonsense, no braces anywhere", &kerala_request());
        assert_eq!(plan.destination, "Kerala");
        assert_eq!(plan.itinerary.len(), 5); // fallback honors "5 days"
    }

    #[test]
    fn test_unparseable_text_keeps_labeled_sections() {
        let text = "We could not produce JSON.\n\nAccommodations: Beach huts in Varkala\n\nTransportation: Rented scooters";
        let plan = normalize(text, &kerala_request());
        assert_eq!(plan.accommodations, "Beach huts in Varkala");
        assert_eq!(plan.transportation, "Rented scooters");
    }

    #[test]
    fn test_totality_on_garbage() {
        let request = TravelRequest::default();
        for input in ["", "\u{0}\u{1}\u{2}", "[1, 2, 3]", "{", "}{", "null", "\"just a string\""] {
            let plan = normalize(input, &request);
            assert!(!plan.itinerary.is_empty(), "input {:?}", input);
            assert!(!plan.accommodations.is_empty());
            assert!(!plan.transportation.is_empty());
            assert!(plan.people >= 1);
        }
    }

    #[test]
    fn test_unrelated_json_object_still_yields_plan() {
        let plan = normalize(r#"{"weather": "sunny", "wind": 12}"#, &kerala_request());
        assert_eq!(plan.destination, "Kerala");
        assert!(!plan.itinerary.is_empty());
    }

    #[test]
    fn test_people_as_string_is_coerced() {
        let reply = r#"{"people": "4", "itinerary": [{"day": "Day 1", "activities": "Arrive"}]}"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.people, 4);
    }

    #[test]
    fn test_missing_day_labels_are_numbered() {
        let reply = r#"{"itinerary": [{"activities": "Arrive"}, {"activities": "Depart"}]}"#;
        let plan = normalize(reply, &kerala_request());
        assert_eq!(plan.itinerary[0].day, "Day 1");
        assert_eq!(plan.itinerary[1].day, "Day 2");
    }
}
