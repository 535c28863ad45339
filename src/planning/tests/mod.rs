//! Unit tests for the planning module.
