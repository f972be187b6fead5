//! Discord command implementations organized by dashboard page.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Embed sizing helpers shared by the list commands
pub mod layout;

/// Labour page commands
pub mod labour;

/// Materials page commands
pub mod materials;

/// Notifications page commands
pub mod notifications;

/// Projects page commands
pub mod projects;

// Export commands
pub use general::*;
pub use labour::*;
pub use materials::*;
pub use notifications::*;
pub use projects::*;
