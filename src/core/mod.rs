//! Core access-list functionality
//!
//! This module contains the access-list types and the wildcard matching they
//! are built on. It provides:
//!
//! - [`address`]: Dotted-decimal codec and the wildcard-mask matcher
//! - [`rule`]: Basic and extended access-list rules
//! - [`ruleset`]: Ordered rule collections
//! - [`binding`]: Interface and flow bindings for an access group
//! - [`firewall`]: The firewall aggregate and its JSON document model
//! - [`loader`]: Reading firewall documents from disk
//! - [`error`]: Error types for all of the above

pub mod address;
pub mod binding;
pub mod error;
pub mod firewall;
pub mod loader;
pub mod rule;
pub mod ruleset;

#[cfg(test)]
pub mod test_helpers;
