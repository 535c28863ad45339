//! In-memory event adapters.

mod event;

pub use event::InMemoryEventRepository;
