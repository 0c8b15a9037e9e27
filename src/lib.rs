//! aclfw - wildcard-mask access control lists
//!
//! Models a network device access list (ordered permit/deny rules keyed by
//! a source address and a wildcard mask) and answers whether a given rule
//! permits a candidate address.
//!
//! # Architecture
//!
//! - [`core`] - Address codec, wildcard matcher, rules, rulesets, bindings and loading
//! - [`validators`] - Identifier validation for rendered device lines
//! - [`config`] - CLI settings persistence
//! - [`utils`] - Utility functions (XDG directories)

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod core;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use crate::core::address::{Address, AddressPattern, WildcardMask, matches};
pub use crate::core::error::{Error, Result};
pub use crate::core::firewall::Firewall;
pub use crate::core::rule::{Access, Destination, Rule};
pub use crate::core::ruleset::RuleSet;
