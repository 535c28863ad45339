//! Convene: event planning with collaborative task tracking.
//!
//! Organizers describe an event in plain language, an AI service drafts the
//! event and its task list, and participants claim tasks, submit solutions
//! and report progress.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, AI, etc.)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`identity`]: Email-based user identity and the session port
//! - [`event`]: Events, participant membership and role resolution
//! - [`task`]: Task lifecycle and access control
//! - [`planning`]: AI-generated event plans, event copies and follow-ups

pub mod event;
pub mod identity;
pub mod planning;
pub mod task;
