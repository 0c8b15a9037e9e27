//! Access-list rule data structures and device-style line rendering
//!
//! A [`Rule`] is one access-list entry:
//! - List label (the `access-list` directive) and group id (e.g. `101`)
//! - Access flag ([`Access::Permit`] or [`Access::Deny`])
//! - Source address + wildcard mask
//! - Optionally a [`Destination`] group (protocol, destination address +
//!   wildcard mask, destination port). A rule carrying one is an extended rule.
//!
//! Rules are immutable once built. The only way to attach a destination is
//! the consuming [`Rule::with_destination`] builder.
//!
//! # Example
//!
//! ```
//! use aclfw::core::rule::Rule;
//!
//! let rule = Rule::parse("access-list", "101", true, "10.0.0.0", "0.0.0.255").unwrap();
//!
//! assert!(rule.query_permit("10.0.0.42".parse().unwrap()));
//! assert_eq!(rule.to_text(), "access-list\t101\tpermit\t10.0.0.0\t0.0.0.255\n");
//! ```

use crate::core::address::{Address, AddressPattern};
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directive written in the first column of every generated rule line.
pub const DEFAULT_LIST_LABEL: &str = "access-list";

/// Rule access flag
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum Access {
    /// Matching addresses are allowed
    #[strum(serialize = "permit")]
    Permit,
    /// Matching addresses are refused
    #[strum(serialize = "deny")]
    Deny,
}

impl Access {
    /// Returns the device keyword (`permit` / `deny`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::Permit => "permit",
            Access::Deny => "deny",
        }
    }

    pub const fn is_permit(self) -> bool {
        matches!(self, Access::Permit)
    }
}

impl From<bool> for Access {
    fn from(permit: bool) -> Self {
        if permit { Access::Permit } else { Access::Deny }
    }
}

/// Destination constraints of an extended rule.
///
/// `protocol` and `port` are carried through verbatim; only the address
/// pattern takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub protocol: String,
    pub pattern: AddressPattern,
    pub port: String,
}

impl Destination {
    pub fn new(protocol: impl Into<String>, pattern: AddressPattern, port: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            pattern,
            port: port.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    list_label: String,
    group_id: String,
    access: Access,
    source: AddressPattern,
    destination: Option<Destination>,
}

impl Rule {
    /// Creates a basic (source-only) rule.
    pub fn new(
        list_label: impl Into<String>,
        group_id: impl Into<String>,
        access: Access,
        source: AddressPattern,
    ) -> Self {
        Self {
            list_label: list_label.into(),
            group_id: group_id.into(),
            access,
            source,
            destination: None,
        }
    }

    /// Creates a basic rule from the textual fields of a configuration entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAddress`](crate::Error::MalformedAddress) if
    /// either the address or the mask is not a valid dotted quad.
    pub fn parse(
        list_label: impl Into<String>,
        group_id: impl Into<String>,
        permit: bool,
        source_address: &str,
        source_mask: &str,
    ) -> Result<Self> {
        let source = AddressPattern::parse(source_address, source_mask)?;
        Ok(Self::new(list_label, group_id, Access::from(permit), source))
    }

    /// Creates an extended rule from its nine textual fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAddress`](crate::Error::MalformedAddress) if
    /// any of the four address/mask fields is malformed.
    #[allow(clippy::too_many_arguments)]
    pub fn parse_extended(
        list_label: impl Into<String>,
        group_id: impl Into<String>,
        permit: bool,
        protocol: impl Into<String>,
        source_address: &str,
        source_mask: &str,
        dest_address: &str,
        dest_mask: &str,
        dest_port: impl Into<String>,
    ) -> Result<Self> {
        let source = AddressPattern::parse(source_address, source_mask)?;
        let dest = AddressPattern::parse(dest_address, dest_mask)?;
        Ok(
            Self::new(list_label, group_id, Access::from(permit), source)
                .with_destination(Destination::new(protocol, dest, dest_port)),
        )
    }

    /// Turns this rule into an extended rule.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn list_label(&self) -> &str {
        &self.list_label
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn source(&self) -> &AddressPattern {
        &self.source
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn is_extended(&self) -> bool {
        self.destination.is_some()
    }

    /// Whether this rule permits `candidate` as a source address.
    ///
    /// A deny rule never reports a positive decision: the result is `false`
    /// whether or not the address matched. Use [`Rule::matches_source`] to
    /// tell the two apart.
    pub fn query_permit(&self, candidate: Address) -> bool {
        self.access.is_permit() && self.source.contains(candidate)
    }

    /// Raw source match, independent of the access flag.
    pub fn matches_source(&self, candidate: Address) -> bool {
        self.source.contains(candidate)
    }

    /// Tests `candidate` against the destination pattern.
    ///
    /// Not gated on the access flag. Returns `None` for a basic rule, which
    /// has no destination to test against.
    pub fn query_permit_dest(&self, candidate: Address) -> Option<bool> {
        self.destination
            .as_ref()
            .map(|dest| dest.pattern.contains(candidate))
    }

    /// Device-syntax line for this rule, newline terminated.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t", self.list_label, self.group_id, self.access)?;
        match &self.destination {
            None => writeln!(f, "{}\t{}", self.source.address, self.source.mask),
            Some(dest) => writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}",
                dest.protocol,
                self.source.address,
                self.source.mask,
                dest.pattern.address,
                dest.pattern.mask,
                dest.port
            ),
        }
    }
}
