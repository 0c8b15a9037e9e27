//! Firewall aggregate and the configuration document it is built from
//!
//! A firewall document looks like:
//!
//! ```json
//! {
//!   "list": [ { "access": true, "src_ip": "192.168.1.0", "src_mask": "0.0.0.255" } ],
//!   "interface_id_list": [ { "interface_id": "GigabitEthernet0/0" } ],
//!   "flow": { "flow_type": "ip", "flow_dir": "in" }
//! }
//! ```
//!
//! The access group number is not part of the document; it is supplied by
//! the caller and stamped on every rule and on the flow binding.
//!
//! # Limits
//!
//! Documents are limited to [`MAX_RULES`] list entries.
//!
//! # Example
//!
//! ```
//! use aclfw::core::firewall::Firewall;
//!
//! let doc = r#"{
//!     "list": [ { "access": true, "src_ip": "10.0.0.0", "src_mask": "0.0.0.255" } ],
//!     "interface_id_list": [ { "interface_id": "Fa0/0" } ],
//!     "flow": { "flow_type": "ip", "flow_dir": "in" }
//! }"#;
//!
//! let firewall = Firewall::from_json_str(doc, "10", "access-list").unwrap();
//! assert_eq!(
//!     firewall.to_text(),
//!     "access-list\t10\tpermit\t10.0.0.0\t0.0.0.255\n\
//!      interface\tFa0/0\n\
//!      ip\taccess-group\t10\tin\n"
//! );
//! ```

use crate::core::address::AddressPattern;
use crate::core::binding::{FlowBinding, InterfaceBinding, InterfaceList};
use crate::core::error::{Error, Result};
use crate::core::rule::{Access, Rule};
use crate::core::ruleset::RuleSet;
use crate::validators;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of list entries accepted from a single document
///
/// Limit prevents memory exhaustion from malformed documents; real
/// device access lists stay far below it.
pub const MAX_RULES: usize = 1000;

/// One `list` entry of a firewall document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AclEntry {
    pub access: bool,
    pub src_ip: String,
    pub src_mask: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub interface_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowEntry {
    pub flow_type: String,
    pub flow_dir: String,
}

/// Raw firewall document as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallDocument {
    pub list: Vec<AclEntry>,
    pub interface_id_list: Vec<InterfaceEntry>,
    pub flow: FlowEntry,
}

impl FirewallDocument {
    /// Parses a document without validating addresses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] if the JSON is invalid or a required
    /// key is missing or of the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config("document", e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firewall {
    group_id: String,
    acl: RuleSet,
    interfaces: InterfaceList,
    flow: FlowBinding,
}

impl Firewall {
    pub fn new(
        group_id: impl Into<String>,
        acl: RuleSet,
        interfaces: InterfaceList,
        flow: FlowBinding,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            acl,
            interfaces,
            flow,
        }
    }

    /// Builds a firewall from a parsed document.
    ///
    /// Every `list` entry becomes one basic rule labelled `list_label` in
    /// group `group_id`, in document order. Construction is all-or-nothing:
    /// the first bad entry aborts it.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a bad group id or list label
    /// - [`Error::ConfigFormat`] naming the offending field (e.g.
    ///   `list[2].src_mask`) for malformed addresses, bad interface ids or
    ///   flow fields, or more than [`MAX_RULES`] entries
    pub fn from_document(doc: &FirewallDocument, group_id: &str, list_label: &str) -> Result<Self> {
        match validators::validate_group_id(group_id) {
            Ok(Some(warning)) => tracing::warn!("{warning}"),
            Ok(None) => {}
            Err(message) => {
                return Err(Error::Validation {
                    field: "group_id".to_string(),
                    message,
                });
            }
        }
        let list_label =
            validators::validate_list_label(list_label).map_err(|message| Error::Validation {
                field: "list_label".to_string(),
                message,
            })?;

        if doc.list.len() > MAX_RULES {
            return Err(Error::config(
                "list",
                format!("{} entries exceeds the limit of {MAX_RULES}", doc.list.len()),
            ));
        }

        let mut acl = RuleSet::new();
        for (i, entry) in doc.list.iter().enumerate() {
            let address = entry
                .src_ip
                .parse()
                .map_err(|e| Error::config(format!("list[{i}].src_ip"), e))?;
            let mask = entry
                .src_mask
                .parse()
                .map_err(|e| Error::config(format!("list[{i}].src_mask"), e))?;
            let rule = Rule::new(
                list_label.as_str(),
                group_id,
                Access::from(entry.access),
                AddressPattern::new(address, mask),
            );
            tracing::debug!("Rule {i}: {} {}", rule.access(), rule.source());
            acl.add(rule);
        }

        let mut interfaces = InterfaceList::new();
        for (i, entry) in doc.interface_id_list.iter().enumerate() {
            let id = validators::validate_interface_id(&entry.interface_id)
                .map_err(|e| Error::config(format!("interface_id_list[{i}].interface_id"), e))?;
            interfaces.add(InterfaceBinding::new(id));
        }

        let flow_type = validators::validate_field(&doc.flow.flow_type, "Flow type")
            .map_err(|e| Error::config("flow.flow_type", e))?;
        let flow_dir = validators::validate_field(&doc.flow.flow_dir, "Flow direction")
            .map_err(|e| Error::config("flow.flow_dir", e))?;

        tracing::info!(
            "Built access group {group_id}: {} rules, {} interfaces, direction {flow_dir}",
            acl.len(),
            interfaces.len()
        );

        Ok(Self::new(
            group_id,
            acl,
            interfaces,
            FlowBinding::new(flow_type, group_id, flow_dir),
        ))
    }

    /// Parses and builds in one step.
    ///
    /// # Errors
    ///
    /// See [`FirewallDocument::from_json_str`] and [`Firewall::from_document`].
    pub fn from_json_str(json: &str, group_id: &str, list_label: &str) -> Result<Self> {
        let doc = FirewallDocument::from_json_str(json)?;
        Self::from_document(&doc, group_id, list_label)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn acl(&self) -> &RuleSet {
        &self.acl
    }

    pub fn interfaces(&self) -> &InterfaceList {
        &self.interfaces
    }

    pub fn flow(&self) -> &FlowBinding {
        &self.flow
    }

    /// Device configuration text: ACL lines, then each interface followed by
    /// the access-group line that binds the list to it.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Firewall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.acl)?;
        if self.interfaces.is_empty() {
            return write!(f, "{}", self.flow);
        }
        for interface in self.interfaces.iter() {
            write!(f, "{interface}{}", self.flow)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::{SAMPLE_DOCUMENT, TEST_GROUP};

    #[test]
    fn test_document_builds_rules_in_order() {
        let fw = Firewall::from_json_str(SAMPLE_DOCUMENT, TEST_GROUP, "access-list").unwrap();
        assert_eq!(fw.acl().len(), 2);

        let first = fw.acl().get(0).unwrap();
        assert_eq!(first.access(), Access::Permit);
        assert_eq!(first.source().to_string(), "192.168.1.0 0.0.0.255");
        assert_eq!(first.group_id(), TEST_GROUP);

        let second = fw.acl().get(1).unwrap();
        assert_eq!(second.access(), Access::Deny);
        assert!(!second.is_extended());
    }

    #[test]
    fn test_document_bindings() {
        let fw = Firewall::from_json_str(SAMPLE_DOCUMENT, TEST_GROUP, "access-list").unwrap();
        assert_eq!(fw.interfaces().len(), 2);
        assert_eq!(fw.flow().to_string(), "ip\taccess-group\t101\tin\n");
        assert_eq!(fw.group_id(), TEST_GROUP);
    }

    #[test]
    fn test_device_text() {
        let fw = Firewall::from_json_str(SAMPLE_DOCUMENT, TEST_GROUP, "access-list").unwrap();
        assert_eq!(
            fw.to_text(),
            "access-list\t101\tpermit\t192.168.1.0\t0.0.0.255\n\
             access-list\t101\tdeny\t10.0.0.0\t0.255.255.255\n\
             interface\tGigabitEthernet0/0\n\
             ip\taccess-group\t101\tin\n\
             interface\tGigabitEthernet0/1\n\
             ip\taccess-group\t101\tin\n"
        );
    }

    #[test]
    fn test_device_text_without_interfaces() {
        let doc = r#"{ "list": [], "interface_id_list": [],
                       "flow": { "flow_type": "ip", "flow_dir": "out" } }"#;
        let fw = Firewall::from_json_str(doc, "5", "access-list").unwrap();
        assert_eq!(fw.to_text(), "ip\taccess-group\t5\tout\n");
    }

    #[test]
    fn test_malformed_address_names_entry() {
        let doc = r#"{
            "list": [
                { "access": true, "src_ip": "10.0.0.0", "src_mask": "0.0.0.255" },
                { "access": true, "src_ip": "10.0.0.0", "src_mask": "0.0.255" }
            ],
            "interface_id_list": [],
            "flow": { "flow_type": "ip", "flow_dir": "in" }
        }"#;
        let err = Firewall::from_json_str(doc, "1", "access-list").unwrap_err();
        match err {
            Error::ConfigFormat { field, message } => {
                assert_eq!(field, "list[1].src_mask");
                assert!(message.contains("expected 4 octets"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let doc = r#"{ "list": [ { "access": true, "src_ip": "10.0.0.0" } ],
                       "interface_id_list": [],
                       "flow": { "flow_type": "ip", "flow_dir": "in" } }"#;
        let err = Firewall::from_json_str(doc, "1", "access-list").unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { ref field, .. } if field == "document"));
        assert!(err.to_string().contains("src_mask"));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let doc = r#"{ "list": [ { "access": "yes", "src_ip": "1.1.1.1", "src_mask": "0.0.0.0" } ],
                       "interface_id_list": [],
                       "flow": { "flow_type": "ip", "flow_dir": "in" } }"#;
        let err = Firewall::from_json_str(doc, "1", "access-list").unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { .. }));
    }

    #[test]
    fn test_invalid_group_id() {
        let err = Firewall::from_json_str(SAMPLE_DOCUMENT, "1 01", "access-list").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "group_id"));
    }

    #[test]
    fn test_invalid_interface_id() {
        let doc = r#"{ "list": [], "interface_id_list": [ { "interface_id": "eth0\n" } ],
                       "flow": { "flow_type": "ip", "flow_dir": "in" } }"#;
        let err = Firewall::from_json_str(doc, "1", "access-list").unwrap_err();
        assert!(
            matches!(err, Error::ConfigFormat { ref field, .. } if field == "interface_id_list[0].interface_id")
        );
    }

    #[test]
    fn test_rule_limit() {
        let entry = AclEntry {
            access: true,
            src_ip: "10.0.0.1".to_string(),
            src_mask: "0.0.0.0".to_string(),
        };
        let doc = FirewallDocument {
            list: vec![entry; MAX_RULES + 1],
            interface_id_list: vec![],
            flow: FlowEntry {
                flow_type: "ip".to_string(),
                flow_dir: "in".to_string(),
            },
        };
        let err = Firewall::from_document(&doc, "1", "access-list").unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { ref field, .. } if field == "list"));

        let mut doc = doc;
        doc.list.truncate(MAX_RULES);
        assert_eq!(
            Firewall::from_document(&doc, "1", "access-list").unwrap().acl().len(),
            MAX_RULES
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let doc = r#"{ "name": "edge", "list": [], "interface_id_list": [],
                       "flow": { "flow_type": "ip", "flow_dir": "in", "note": "x" } }"#;
        assert!(Firewall::from_json_str(doc, "1", "access-list").is_ok());
    }
}
