//! Interface and traffic-flow bindings for an access group
//!
//! These are plain holders; their only behaviour is rendering the
//! device-syntax lines that attach an access group to interfaces.

use std::fmt;

/// Keyword written between the flow type and the group id.
pub const ACCESS_GROUP_KEYWORD: &str = "access-group";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBinding {
    interface_id: String,
}

impl InterfaceBinding {
    pub fn new(interface_id: impl Into<String>) -> Self {
        Self {
            interface_id: interface_id.into(),
        }
    }

    pub fn interface_id(&self) -> &str {
        &self.interface_id
    }
}

impl fmt::Display for InterfaceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "interface\t{}", self.interface_id)
    }
}

/// Interfaces the access group is applied to, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceList {
    interfaces: Vec<InterfaceBinding>,
}

impl InterfaceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, binding: InterfaceBinding) {
        self.interfaces.push(binding);
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InterfaceBinding> {
        self.interfaces.iter()
    }
}

impl fmt::Display for InterfaceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for binding in &self.interfaces {
            write!(f, "{binding}")?;
        }
        Ok(())
    }
}

/// Access group applied in one traffic direction.
///
/// `flow_type` (e.g. `ip`) and `direction` (e.g. `in`) are passed through
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowBinding {
    flow_type: String,
    group_id: String,
    direction: String,
}

impl FlowBinding {
    pub fn new(
        flow_type: impl Into<String>,
        group_id: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            flow_type: flow_type.into(),
            group_id: group_id.into(),
            direction: direction.into(),
        }
    }

    pub fn flow_type(&self) -> &str {
        &self.flow_type
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }
}

impl fmt::Display for FlowBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\t{ACCESS_GROUP_KEYWORD}\t{}\t{}",
            self.flow_type, self.group_id, self.direction
        )
    }
}
