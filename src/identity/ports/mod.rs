//! Port contracts for identity resolution.

pub mod session;

pub use session::SessionProvider;
