//! Domain values describing who is acting.

mod email;
mod error;
mod user;

pub use email::EmailAddress;
pub use error::IdentityError;
pub use user::UserIdentity;
