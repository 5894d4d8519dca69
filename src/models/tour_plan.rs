use serde::{Deserialize, Serialize};

/// Structured trip request derived from one chat message. Ephemeral; the
/// only field that gates further processing is `destination`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelRequest {
    pub destination: Option<String>,
    pub specific_locations: Vec<String>,
    pub duration: Option<String>,
    pub people: Option<u32>,
    pub budget: Option<String>,
}

impl TravelRequest {
    /// A request can only be turned into a plan once a destination is known.
    pub fn is_actionable(&self) -> bool {
        self.destination.is_some()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDay {
    pub day: String,
    pub activities: String,
}

/// Canonical itinerary record returned to the client and stored inside a
/// custom trip request. Field names are part of the client contract.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TourPlan {
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub people: u32,
    pub itinerary: Vec<ItineraryDay>,
    pub accommodations: String,
    pub transportation: String,
}
