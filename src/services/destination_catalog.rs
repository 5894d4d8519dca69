use serde::Deserialize;
use std::sync::OnceLock;

use crate::models::tour_plan::ItineraryDay;
use crate::services::travel_info::capitalize_first;

/// Pre-authored itinerary bundle for one destination key. Keys are
/// lower-case and matched by substring containment, in catalog order.
#[derive(Debug, Deserialize, Clone)]
pub struct PlanTemplate {
    pub key: String,
    pub itinerary: Vec<ItineraryDay>,
    pub accommodations: String,
    pub transportation: String,
}

const CATALOG_JSON: &str = include_str!("../../data/destinations.json");

/// Gazetteer names without a hand-authored template; these get a
/// synthesized generic 3-day template appended after the curated entries.
const GENERIC_DESTINATIONS: &[&str] = &[
    "kolkata",
    "pune",
    "udaipur",
    "jodhpur",
    "varanasi",
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
];

static CATALOG: OnceLock<Vec<PlanTemplate>> = OnceLock::new();

/// Read-only catalog, loaded once. Order matters: curated entries first,
/// in data-file order, then the synthesized generic ones.
pub fn catalog() -> &'static [PlanTemplate] {
    CATALOG.get_or_init(|| {
        let mut entries: Vec<PlanTemplate> =
            serde_json::from_str(CATALOG_JSON).expect("destinations.json is malformed");

        for name in GENERIC_DESTINATIONS {
            if entries.iter().any(|entry| entry.key == *name) {
                continue;
            }
            entries.push(generic_template_for(name));
        }

        entries
    })
}

fn generic_template_for(name: &str) -> PlanTemplate {
    let display = capitalize_first(name);
    PlanTemplate {
        key: name.to_string(),
        itinerary: vec![
            ItineraryDay {
                day: "Day 1".to_string(),
                activities: format!("Arrival and exploration of main attractions in {}", display),
            },
            ItineraryDay {
                day: "Day 2".to_string(),
                activities: format!("Visit popular landmarks and cultural sites in {}", display),
            },
            ItineraryDay {
                day: "Day 3".to_string(),
                activities: format!(
                    "Experience local cuisine, markets, and traditional activities in {}",
                    display
                ),
            },
        ],
        accommodations: "Options range from budget to luxury based on your preferences"
            .to_string(),
        transportation:
            "Local transportation options including taxi, public transit, and rental vehicles"
                .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_curated_entries_first() {
        let entries = catalog();
        assert!(!entries.is_empty());
        assert_eq!(entries[0].key, "delhi");
        for entry in entries {
            assert!(!entry.itinerary.is_empty());
            assert!(!entry.accommodations.is_empty());
            assert!(!entry.transportation.is_empty());
        }
    }

    #[test]
    fn test_generic_templates_synthesized() {
        let entries = catalog();
        let pune = entries
            .iter()
            .find(|entry| entry.key == "pune")
            .expect("pune template should be synthesized");
        assert_eq!(pune.itinerary.len(), 3);
        assert!(pune.itinerary[0].activities.contains("Pune"));
    }

    #[test]
    fn test_no_duplicate_keys() {
        let entries = catalog();
        for (i, entry) in entries.iter().enumerate() {
            assert!(
                !entries[i + 1..].iter().any(|other| other.key == entry.key),
                "duplicate catalog key: {}",
                entry.key
            );
        }
    }
}
