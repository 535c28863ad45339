//! User identity for event collaboration.
//!
//! Identities are resolved once at the edge through a [`ports::SessionProvider`]
//! and then passed explicitly into every service call. Business logic never
//! looks up the current user on its own.

pub mod adapters;
pub mod domain;
pub mod ports;
