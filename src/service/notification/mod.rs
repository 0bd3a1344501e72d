//! Notification classification and rendering.
//!
//! The classifier is a pure, total mapping from the raw type string to a
//! semantic category and an optional timer rule. Unknown type strings fall
//! back to [`NotificationType::Unknown`] with the info category so that new
//! upstream types never break forwarding.

pub mod embed;
pub mod payload;
pub mod types;

pub use types::{Category, NotificationType};
