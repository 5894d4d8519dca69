pub mod booking;
pub mod chatbot;
pub mod contact;
pub mod custom_trip;
pub mod health;
pub mod package;
