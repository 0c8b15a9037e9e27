//! Shared test utilities for core module tests
//!
//! Provides common test helpers to avoid duplication across test suites.
//! This module is only compiled in test mode.

use crate::core::rule::{DEFAULT_LIST_LABEL, Rule};
use crate::core::ruleset::RuleSet;

/// Group id used by every helper-built rule.
pub const TEST_GROUP: &str = "101";

/// Sample document covering two rules, two interfaces and an inbound flow.
pub const SAMPLE_DOCUMENT: &str = r#"{
    "list": [
        { "access": true,  "src_ip": "192.168.1.0", "src_mask": "0.0.0.255" },
        { "access": false, "src_ip": "10.0.0.0",    "src_mask": "0.255.255.255" }
    ],
    "interface_id_list": [
        { "interface_id": "GigabitEthernet0/0" },
        { "interface_id": "GigabitEthernet0/1" }
    ],
    "flow": { "flow_type": "ip", "flow_dir": "in" }
}"#;

/// Builds a basic rule in [`TEST_GROUP`].
///
/// Panics on malformed input; only call with literal addresses.
pub fn basic_rule(permit: bool, source: &str, mask: &str) -> Rule {
    Rule::parse(DEFAULT_LIST_LABEL, TEST_GROUP, permit, source, mask)
        .expect("helper rule must parse")
}

/// Creates a three-rule set: permit 10.0.0.0/24, deny 10.0.1.0/24, permit any.
///
/// This is the canonical helper for creating test rulesets.
pub fn create_test_ruleset() -> RuleSet {
    let mut set = RuleSet::new();
    set.add(basic_rule(true, "10.0.0.0", "0.0.0.255"));
    set.add(basic_rule(false, "10.0.1.0", "0.0.0.255"));
    set.add(basic_rule(true, "0.0.0.0", "255.255.255.255"));
    set
}
