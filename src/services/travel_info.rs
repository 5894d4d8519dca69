use regex::Regex;

use crate::models::tour_plan::TravelRequest;

/// Recognized place names, scanned in order: cities first, then
/// states/regions. The first gazetteer entry found anywhere in the prompt
/// wins and ends the scan, so the more specific city names take precedence
/// over the region names listed after them.
pub const GAZETTEER: &[&str] = &[
    // Major cities
    "delhi",
    "mumbai",
    "bangalore",
    "hyderabad",
    "chennai",
    "kolkata",
    "ahmedabad",
    "pune",
    "jaipur",
    "udaipur",
    "jodhpur",
    "goa",
    "kerala",
    "varanasi",
    "agra",
    "amritsar",
    "shimla",
    "manali",
    "darjeeling",
    "ooty",
    "munnar",
    "alleppey",
    "kodaikanal",
    "mahabalipuram",
    "hampi",
    "mysore",
    "kochi",
    "kanyakumari",
    "gangtok",
    "leh",
    // States/regions
    "rajasthan",
    "himachal pradesh",
    "uttarakhand",
    "tamil nadu",
    "karnataka",
    "maharashtra",
    "gujarat",
    "punjab",
    "west bengal",
    "sikkim",
    "ladakh",
    "andaman and nicobar",
    "lakshadweep",
    "kashmir",
];

/// Parses a free-text chat message into a structured trip request.
/// Pure and deterministic; matching is case-insensitive.
pub fn extract_travel_info(user_prompt: &str) -> TravelRequest {
    let prompt = user_prompt.to_lowercase();
    let mut info = TravelRequest::default();

    for dest in GAZETTEER {
        if prompt.contains(dest) {
            info.destination = Some(capitalize_first(dest));
            break;
        }
    }

    let duration_re = Regex::new(r"(\d+)\s*(days?|nights?|weeks?)").expect("duration pattern");
    if let Some(caps) = duration_re.captures(&prompt) {
        info.duration = Some(format!("{} {}", &caps[1], &caps[2]));
    }

    let people_re =
        Regex::new(r"(\d+)\s*(person|people|adults?|travell?ers?|famil(?:y|ies)|groups?)")
            .expect("people pattern");
    if let Some(caps) = people_re.captures(&prompt) {
        // Only the count is kept; the unit word is discarded.
        info.people = caps[1].parse::<u32>().ok().filter(|&n| n > 0);
    }

    // The whole matched substring is kept verbatim, currency glyph and all.
    let budget_re = Regex::new(
        r"(?i)(₹|€|£|\$)?(\d+)k?(\s*(-|to)\s*(₹|€|£|\$)?(\d+)k?)?\s*(budget|dollars|usd|euro|rupees|pound|eur|gbp|inr)",
    )
    .expect("budget pattern");
    if let Some(m) = budget_re.find(&prompt) {
        info.budget = Some(m.as_str().to_string());
    }

    info
}

/// "himachal pradesh" -> "Himachal pradesh", matching how destinations are
/// displayed everywhere downstream.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_extraction() {
        let info =
            extract_travel_info("I want to visit Kerala for 5 days with 2 people and a 50k budget");
        assert_eq!(info.destination.as_deref(), Some("Kerala"));
        assert_eq!(info.duration.as_deref(), Some("5 days"));
        assert_eq!(info.people, Some(2));
        assert!(info.budget.as_deref().unwrap_or("").contains("50k"));
        assert!(info.is_actionable());
    }

    #[test]
    fn test_no_destination() {
        let info = extract_travel_info("plan me a nice relaxing trip");
        assert_eq!(info.destination, None);
        assert!(!info.is_actionable());
    }

    #[test]
    fn test_gazetteer_order_wins_not_text_order() {
        // "goa" precedes "kerala" in the gazetteer, so it wins even though
        // "kerala" appears first in the prompt.
        let info = extract_travel_info("should we do kerala or goa this winter?");
        assert_eq!(info.destination.as_deref(), Some("Goa"));
    }

    #[test]
    fn test_multi_word_region() {
        let info = extract_travel_info("2 weeks across himachal pradesh");
        assert_eq!(info.destination.as_deref(), Some("Himachal pradesh"));
        assert_eq!(info.duration.as_deref(), Some("2 weeks"));
    }

    #[test]
    fn test_duration_unit_passes_through_unchanged() {
        let info = extract_travel_info("goa for 1 day");
        assert_eq!(info.duration.as_deref(), Some("1 day"));
        let info = extract_travel_info("goa for 3 nights");
        assert_eq!(info.duration.as_deref(), Some("3 nights"));
    }

    #[test]
    fn test_people_unit_words() {
        assert_eq!(extract_travel_info("4 adults in goa").people, Some(4));
        assert_eq!(extract_travel_info("2 travellers to goa").people, Some(2));
        assert_eq!(extract_travel_info("a goa trip, 6 people").people, Some(6));
        assert_eq!(extract_travel_info("0 people").people, None);
    }

    #[test]
    fn test_budget_variants() {
        let info = extract_travel_info("goa with a ₹30000 budget");
        assert_eq!(info.budget.as_deref(), Some("₹30000 budget"));

        let info = extract_travel_info("goa for $500 dollars");
        assert_eq!(info.budget.as_deref(), Some("$500 dollars"));

        let info = extract_travel_info("goa, 20k to 30k rupees");
        assert_eq!(info.budget.as_deref(), Some("20k to 30k rupees"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let prompt = "Delhi for 7 days, 3 people, 80k rupees";
        assert_eq!(extract_travel_info(prompt), extract_travel_info(prompt));
    }

    #[test]
    fn test_empty_input() {
        let info = extract_travel_info("");
        assert_eq!(info, TravelRequest::default());
    }
}
