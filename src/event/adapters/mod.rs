//! Adapter implementations for event ports.

pub mod memory;
