//! Data models for platform entities

mod conversation;
mod message;
mod resource;
mod tenant;

pub use conversation::*;
pub use message::*;
pub use resource::*;
pub use tenant::*;
