//! Unit tests for the event context.
