pub mod ai_plan_service;
pub mod destination_catalog;
pub mod email_service;
pub mod fallback_plan;
pub mod plan_normalizer;
pub mod prompt;
pub mod travel_info;
