//! Session handling
//!
//! Authentication is delegated to an external GoTrue-style session provider.
//! This module speaks the password and refresh-token grants and stores the
//! resulting session in the config file.

pub mod session;
pub mod tokens;

pub use session::{login, logout, status};
pub use tokens::{StoredToken, TokenStore};
