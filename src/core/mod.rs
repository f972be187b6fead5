//! Core business logic - framework-agnostic page controllers.
//!
//! Each page owns its collection in memory, mutates it through the operations
//! below, and writes the whole collection back through a
//! [`KeyValueStore`](crate::store::KeyValueStore). Nothing in here knows about
//! Discord.

/// Id generation for workers and projects
pub mod ids;
/// Labour page (workers)
pub mod labour;
/// Materials page (inventory)
pub mod materials;
/// Notifications page (derived alerts)
pub mod notifications;
/// Projects page
pub mod projects;
