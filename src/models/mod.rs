//! Data models for the Sitesmith backend.
//!
//! Document shapes match the nested platform document stored by the admin UI,
//! so existing documents deserialize without migration.

mod platform;
mod requests;
mod section;
mod user;

pub use platform::*;
pub use requests::*;
pub use section::*;
pub use user::*;
