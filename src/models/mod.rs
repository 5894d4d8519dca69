pub mod booking;
pub mod custom_trip;
pub mod package;
pub mod tour_plan;
