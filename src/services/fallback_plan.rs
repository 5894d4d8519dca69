use regex::Regex;

use crate::models::tour_plan::{ItineraryDay, TourPlan, TravelRequest};
use crate::services::destination_catalog::{self, PlanTemplate};

const DEFAULT_DESTINATION: &str = "Your destination";
const DEFAULT_DURATION: &str = "Your trip duration";
const DEFAULT_BUDGET: &str = "As per your budget";
const GENERIC_ACCOMMODATIONS: &str =
    "Options range from budget to luxury based on your preferences";
const GENERIC_TRANSPORTATION: &str =
    "Local transportation options including taxi, public transit, and rental vehicles";

/// Parsed day blocks shorter than this are replaced with a generic line.
const MIN_PARSED_ACTIVITY_LEN: usize = 10;

/// Deterministic, non-AI plan synthesis. Total: every request, however
/// sparse, yields a fully populated TourPlan.
pub fn generate_fallback_plan(request: &TravelRequest) -> TourPlan {
    let destination_key = request
        .destination
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    // First catalog key contained in the destination wins, in catalog order.
    let template = destination_catalog::catalog()
        .iter()
        .find(|entry| destination_key.contains(&entry.key))
        .cloned()
        .unwrap_or_else(generic_template);

    let PlanTemplate {
        key: _,
        mut itinerary,
        accommodations,
        transportation,
    } = template;

    if let Some(days) = requested_days(request.duration.as_deref()) {
        reconcile_duration(&mut itinerary, days, request.destination.as_deref());
    }

    TourPlan {
        destination: request
            .destination
            .clone()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        duration: request
            .duration
            .clone()
            .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        budget: request
            .budget
            .clone()
            .unwrap_or_else(|| DEFAULT_BUDGET.to_string()),
        people: request.people.unwrap_or(1),
        itinerary,
        accommodations,
        transportation,
    }
}

/// Template used when no catalog key matches the destination.
fn generic_template() -> PlanTemplate {
    PlanTemplate {
        key: String::new(),
        itinerary: vec![
            ItineraryDay {
                day: "Day 1".to_string(),
                activities: "Arrival and check-in to accommodation, local area exploration"
                    .to_string(),
            },
            ItineraryDay {
                day: "Day 2".to_string(),
                activities: "Visit main attractions and landmarks".to_string(),
            },
            ItineraryDay {
                day: "Day 3".to_string(),
                activities: "Experience local culture, cuisine and shopping".to_string(),
            },
            ItineraryDay {
                day: "Final Day".to_string(),
                activities: "Leisure time and departure".to_string(),
            },
        ],
        accommodations: GENERIC_ACCOMMODATIONS.to_string(),
        transportation: GENERIC_TRANSPORTATION.to_string(),
    }
}

/// Leading integer of a duration string like "5 days", if any.
fn requested_days(duration: Option<&str>) -> Option<usize> {
    let duration = duration?;
    let number_re = Regex::new(r"(\d+)").expect("number pattern");
    number_re
        .captures(duration)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Stretches or trims the template itinerary to exactly `days` entries.
fn reconcile_duration(itinerary: &mut Vec<ItineraryDay>, days: usize, destination: Option<&str>) {
    if days > itinerary.len() {
        let place = destination.unwrap_or("your destination").to_string();
        for i in itinerary.len() + 1..=days {
            itinerary.push(ItineraryDay {
                day: format!("Day {}", i),
                activities: format!(
                    "Explore local attractions, relaxation, and optional activities in {}",
                    place
                ),
            });
        }
    } else if days < itinerary.len() {
        itinerary.truncate(days);
    }
}

/// Scans free text for "day <n>" markers and treats the text between
/// consecutive markers as that day's activity block. Used when a provider
/// reply carried no usable itinerary array.
pub fn parse_itinerary_text(text: &str) -> Vec<ItineraryDay> {
    let lower = text.to_lowercase();
    let marker_re =
        Regex::new(r"day\s*(\d+|one|two|three|four|five|six|seven|eight|nine|ten)")
            .expect("day marker pattern");

    let markers: Vec<(usize, usize, String)> = marker_re
        .captures_iter(&lower)
        .map(|caps| {
            let whole = caps.get(0).expect("match group 0");
            (whole.start(), whole.end(), caps[1].to_string())
        })
        .collect();

    if markers.is_empty() {
        return vec![
            ItineraryDay {
                day: "Day 1".to_string(),
                activities: "Arrival and exploration".to_string(),
            },
            ItineraryDay {
                day: "Day 2".to_string(),
                activities: "Visit main attractions".to_string(),
            },
            ItineraryDay {
                day: "Day 3".to_string(),
                activities: "Departure".to_string(),
            },
        ];
    }

    markers
        .iter()
        .enumerate()
        .map(|(idx, (_, end, label))| {
            let block_end = markers.get(idx + 1).map(|next| next.0).unwrap_or(lower.len());
            let activities = scrub_day_block(&lower[*end..block_end]);
            ItineraryDay {
                day: format!("Day {}", label),
                activities: if activities.len() > MIN_PARSED_ACTIVITY_LEN {
                    activities
                } else {
                    "Explore local attractions and cuisine".to_string()
                },
            }
        })
        .collect()
}

fn scrub_day_block(block: &str) -> String {
    let time_words = Regex::new(r"morning|afternoon|evening").expect("time-of-day pattern");
    time_words
        .replace_all(block, "")
        .replace(':', "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goa_request(duration: Option<&str>) -> TravelRequest {
        TravelRequest {
            destination: Some("Goa".to_string()),
            duration: duration.map(str::to_string),
            people: Some(2),
            budget: Some("50k budget".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_catalog_template_matched_by_substring() {
        let plan = generate_fallback_plan(&goa_request(None));
        assert_eq!(plan.destination, "Goa");
        assert_eq!(plan.itinerary.len(), 3);
        assert!(plan.itinerary[0].activities.contains("Calangute"));
        assert!(plan.accommodations.contains("North Goa"));
    }

    #[test]
    fn test_duration_extends_template() {
        let plan = generate_fallback_plan(&goa_request(Some("5 days")));
        assert_eq!(plan.itinerary.len(), 5);
        // First three entries come from the template untouched.
        assert!(plan.itinerary[0].activities.contains("Calangute"));
        assert_eq!(plan.itinerary[3].day, "Day 4");
        assert_eq!(plan.itinerary[4].day, "Day 5");
        assert!(plan.itinerary[4].activities.contains("Goa"));
    }

    #[test]
    fn test_duration_truncates_template() {
        let plan = generate_fallback_plan(&goa_request(Some("2 days")));
        assert_eq!(plan.itinerary.len(), 2);
        assert!(plan.itinerary[0].activities.contains("Calangute"));
        assert!(plan.itinerary[1].activities.contains("Old Goa"));
    }

    #[test]
    fn test_duration_equal_leaves_template_alone() {
        let plan = generate_fallback_plan(&goa_request(Some("3 days")));
        assert_eq!(plan.itinerary.len(), 3);
    }

    #[test]
    fn test_unknown_destination_gets_generic_template() {
        let request = TravelRequest {
            destination: Some("Timbuktu".to_string()),
            ..Default::default()
        };
        let plan = generate_fallback_plan(&request);
        assert_eq!(plan.itinerary.len(), 4);
        assert_eq!(plan.itinerary[3].day, "Final Day");
        assert_eq!(plan.people, 1);
        assert_eq!(plan.budget, "As per your budget");
    }

    #[test]
    fn test_absent_destination_is_total() {
        let plan = generate_fallback_plan(&TravelRequest::default());
        assert_eq!(plan.destination, "Your destination");
        assert_eq!(plan.duration, "Your trip duration");
        assert!(!plan.itinerary.is_empty());
        assert!(!plan.accommodations.is_empty());
        assert!(!plan.transportation.is_empty());
    }

    #[test]
    fn test_fallback_is_idempotent() {
        let request = goa_request(Some("6 days"));
        assert_eq!(
            generate_fallback_plan(&request),
            generate_fallback_plan(&request)
        );
    }

    #[test]
    fn test_text_parser_extracts_day_blocks() {
        let text = "Day 1: Visit the old fort and the spice market downtown. \
                    Day 2: Morning beach walk, then the maritime museum. \
                    Day 3: Shopping and departure transfers.";
        let days = parse_itinerary_text(text);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day, "Day 1");
        assert_eq!(days[1].day, "Day 2");
        assert_eq!(days[2].day, "Day 3");
        assert!(days[0].activities.contains("spice market"));
        // Time-of-day words and colons are scrubbed.
        assert!(!days[1].activities.contains("morning"));
        assert!(!days[0].activities.contains(':'));
    }

    #[test]
    fn test_text_parser_short_block_gets_generic_line() {
        let days = parse_itinerary_text("Day 1: rest. Day 2: a full tour of the city museums.");
        assert_eq!(days[0].activities, "Explore local attractions and cuisine");
        assert!(days[1].activities.contains("museums"));
    }

    #[test]
    fn test_text_parser_spelled_numbers() {
        let days = parse_itinerary_text("day one we arrive and settle in, day two we explore the coastline");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, "Day one");
        assert_eq!(days[1].day, "Day two");
    }

    #[test]
    fn test_text_parser_no_markers_yields_generic_sequence() {
        let days = parse_itinerary_text("no structure here at all");
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day, "Day 1");
        assert_eq!(days[0].activities, "Arrival and exploration");
        assert_eq!(days[2].activities, "Departure");
    }
}
