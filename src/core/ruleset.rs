//! Ordered access list
//!
//! Insertion order is display order. Duplicates are kept. The list only
//! grows through [`RuleSet::add`] and only shrinks through [`RuleSet::clear`].

use crate::core::address::Address;
use crate::core::error::{Error, Result};
use crate::core::rule::Rule;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the end of the list.
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&Rule> {
        self.rules.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.rules.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules that individually permit `candidate`, with their positions.
    ///
    /// Every rule is tested on its own; earlier rules do not shadow later ones.
    pub fn matching(&self, candidate: Address) -> impl Iterator<Item = (usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.query_permit(candidate))
    }

    /// Concatenated device-syntax lines of every rule, in order.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
