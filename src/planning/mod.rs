//! AI-assisted event planning.
//!
//! An organizer describes an event in free text; the [`ports::AiClient`]
//! returns a structured plan which [`services::EventPlanningService`] turns
//! into an event and its pending tasks. The same service copies an event
//! into a new edition and asks for follow-up suggestions.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
