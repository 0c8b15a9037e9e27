//! Dotted-decimal addresses, wildcard masks and the wildcard match
//!
//! Both [`Address`] and [`WildcardMask`] are stored as a big-endian `u32`
//! (first octet in the most significant byte), so the bit at position 0 of
//! [`Address::to_bits`] is the high bit of the first octet.
//!
//! # Wildcard semantics
//!
//! A wildcard mask is the inverse of a subnet mask: a `1` bit marks a
//! don't-care position, a `0` bit marks a position where the candidate must
//! equal the reference address.
//!
//! ```
//! use aclfw::core::address::{matches, Address, WildcardMask};
//!
//! let reference: Address = "192.168.1.0".parse().unwrap();
//! let mask: WildcardMask = "0.0.0.255".parse().unwrap();
//!
//! assert!(matches("192.168.1.77".parse().unwrap(), reference, mask));
//! assert!(!matches("192.168.2.77".parse().unwrap(), reference, mask));
//! ```

use crate::core::error::{Error, Result};
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Parses `a.b.c.d` into a big-endian `u32`.
///
/// Rejects anything that is not exactly four fields of ASCII digits with a
/// value in 0..=255. Leading zeros are accepted (`010` is 10).
fn parse_dotted_quad(input: &str) -> Result<u32> {
    let fields: Vec<&str> = input.split('.').collect();
    if fields.len() != 4 {
        return Err(Error::malformed(
            input,
            format!("expected 4 octets, found {}", fields.len()),
        ));
    }

    let mut bits = 0u32;
    for field in fields {
        if field.is_empty() {
            return Err(Error::malformed(input, "empty octet"));
        }
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed(
                input,
                format!("octet '{field}' is not a decimal integer"),
            ));
        }
        // All-digit input only fails to parse on overflow
        let value = field.parse::<u32>().unwrap_or(u32::MAX);
        if value > 255 {
            return Err(Error::malformed(
                input,
                format!("octet {field} exceeds 255"),
            ));
        }
        bits = (bits << 8) | value;
    }
    Ok(bits)
}

fn write_dotted_quad(bits: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [a, b, c, d] = bits.to_be_bytes();
    write!(f, "{a}.{b}.{c}.{d}")
}

/// Shared conversions for the two dotted-quad newtypes.
macro_rules! dotted_quad {
    ($name:ident) => {
        impl $name {
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            pub const fn from_octets(octets: [u8; 4]) -> Self {
                Self(u32::from_be_bytes(octets))
            }

            /// Raw 32-bit value, first octet most significant.
            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn octets(self) -> [u8; 4] {
                self.0.to_be_bytes()
            }

            /// 32 `0`/`1` characters, 8 per octet, most significant bit first.
            pub fn to_bits(self) -> String {
                format!("{:032b}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                parse_dotted_quad(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_dotted_quad(self.0, f)
            }
        }

        impl From<Ipv4Addr> for $name {
            fn from(addr: Ipv4Addr) -> Self {
                Self(u32::from(addr))
            }
        }

        impl From<$name> for Ipv4Addr {
            fn from(value: $name) -> Self {
                Ipv4Addr::from(value.0)
            }
        }
    };
}

/// IPv4 address in dotted-decimal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(u32);

dotted_quad!(Address);

/// Cisco-style wildcard mask (inverse of a subnet mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WildcardMask(u32);

dotted_quad!(WildcardMask);

impl WildcardMask {
    /// `255.255.255.255`: every address matches.
    pub const ANY: Self = Self(u32::MAX);
    /// `0.0.0.0`: only the reference address itself matches.
    pub const EXACT: Self = Self(0);

    /// Prefix length of the equivalent subnet mask.
    ///
    /// Returns `None` for discontiguous masks such as `0.255.0.255`, which
    /// have no CIDR equivalent.
    #[allow(clippy::cast_possible_truncation)] // leading_ones() <= 32
    pub const fn prefix_len(self) -> Option<u8> {
        let subnet = !self.0;
        let ones = subnet.leading_ones();
        if ones + subnet.trailing_zeros() == 32 {
            Some(ones as u8)
        } else {
            None
        }
    }

    /// Whether the bit at `position` (0 = most significant) is don't-care.
    pub const fn is_wildcard_bit(self, position: u32) -> bool {
        position < 32 && (self.0 >> (31 - position)) & 1 == 1
    }
}

/// Tests `candidate` against a reference address under a wildcard mask.
///
/// True iff every position whose mask bit is 0 carries the same bit in
/// `candidate` and `reference`.
pub const fn matches(candidate: Address, reference: Address, mask: WildcardMask) -> bool {
    (candidate.0 ^ reference.0) & !mask.0 == 0
}

/// Renders the per-bit working pattern for a reference/mask pair.
///
/// Significant positions show the bit the candidate must carry, don't-care
/// positions show `i`. Octets are separated by `.`:
///
/// ```
/// use aclfw::core::address::working_pattern;
///
/// let pattern = working_pattern("10.0.0.0".parse().unwrap(), "0.0.0.255".parse().unwrap());
/// assert_eq!(pattern, "00001010.00000000.00000000.iiiiiiii");
/// ```
pub fn working_pattern(reference: Address, mask: WildcardMask) -> String {
    let mut out = String::with_capacity(35);
    for position in 0..32u32 {
        if position > 0 && position % 8 == 0 {
            out.push('.');
        }
        if mask.is_wildcard_bit(position) {
            out.push('i');
        } else if (reference.0 >> (31 - position)) & 1 == 1 {
            out.push('1');
        } else {
            out.push('0');
        }
    }
    out
}

/// A reference address paired with its wildcard mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressPattern {
    pub address: Address,
    pub mask: WildcardMask,
}

impl AddressPattern {
    pub const fn new(address: Address, mask: WildcardMask) -> Self {
        Self { address, mask }
    }

    /// Parses the address and mask text of a rule field pair.
    pub fn parse(address: &str, mask: &str) -> Result<Self> {
        Ok(Self {
            address: address.parse()?,
            mask: mask.parse()?,
        })
    }

    pub const fn contains(&self, candidate: Address) -> bool {
        matches(candidate, self.address, self.mask)
    }

    pub fn working_pattern(&self) -> String {
        working_pattern(self.address, self.mask)
    }

    /// CIDR form of the pattern when the mask is contiguous.
    ///
    /// Don't-care bits of the reference address are cleared, so
    /// `10.0.0.5 0.0.0.255` becomes `10.0.0.0/24`.
    pub fn to_network(&self) -> Option<Ipv4Network> {
        let prefix = self.mask.prefix_len()?;
        let base = Ipv4Addr::from(self.address.0 & !self.mask.0);
        Ipv4Network::new(base, prefix).ok()
    }
}

impl fmt::Display for AddressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.mask)
    }
}
