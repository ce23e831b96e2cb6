use std::fmt;

use crate::error::{AddressError, Result};

const GROUPS: usize = 8;

/// An IPv6 address with every group written out as four hex digits.
///
/// Digit case is preserved from the input. An embedded dotted-quad tail
/// becomes two lowercase groups, and a zone index is carried alongside the
/// groups rather than inside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedIpv6 {
    groups: [String; GROUPS],
    zone: Option<String>,
}

impl ExpandedIpv6 {
    /// Expand an address that already passed [`is_valid_ipv6`](crate::is_valid_ipv6).
    ///
    /// No grammar validation happens here. Input that slipped past the
    /// classifier is reported instead of being truncated or padded into shape.
    pub fn parse(address: &str) -> Result<Self> {
        let (addr, zone) = match address.split_once('%') {
            Some((addr, zone)) => (addr, Some(zone.to_string())),
            None => (address, None),
        };

        let groups = match addr.split_once("::") {
            Some((left, right)) => {
                let mut groups = parse_groups(address, left, false)?;
                let right = parse_groups(address, right, true)?;
                let present = groups.len() + right.len();
                if present > GROUPS {
                    return Err(malformed(address, present));
                }
                groups.extend(std::iter::repeat_n(String::from("0000"), GROUPS - present));
                groups.extend(right);
                groups
            }
            None => parse_groups(address, addr, true)?,
        };

        let found = groups.len();
        let groups: [String; GROUPS] = groups
            .try_into()
            .map_err(|_| malformed(address, found))?;

        Ok(Self { groups, zone })
    }

    /// The eight four-digit groups, most significant first.
    pub fn groups(&self) -> &[String; GROUPS] {
        &self.groups
    }

    /// The `%`-suffixed interface identifier, without the `%`.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// The same address with its group order reversed. The zone stays a suffix.
    pub fn reversed(&self) -> Self {
        let mut groups = self.groups.clone();
        groups.reverse();
        Self {
            groups,
            zone: self.zone.clone(),
        }
    }
}

impl fmt::Display for ExpandedIpv6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.groups.join(":"))?;
        if let Some(zone) = &self.zone {
            write!(f, "%{}", zone)?;
        }
        Ok(())
    }
}

/// Expand a compressed IPv6 address into its full 8-group form.
///
/// The input must already be a valid IPv6 address.
///
/// ```rust
/// use ipreverse::expand_ipv6;
///
/// assert_eq!(
///     expand_ipv6("2001:db8::8a2e:370:7334").unwrap(),
///     "2001:0db8:0000:0000:0000:8a2e:0370:7334"
/// );
/// ```
pub fn expand_ipv6(address: &str) -> Result<String> {
    ExpandedIpv6::parse(address).map(|expanded| expanded.to_string())
}

/// Split one side of a `::` (or a whole uncompressed address) into padded groups.
fn parse_groups(address: &str, part: &str, allow_ipv4_tail: bool) -> Result<Vec<String>> {
    if part.is_empty() {
        return Ok(Vec::new());
    }

    let pieces: Vec<&str> = part.split(':').collect();
    let last = pieces.len() - 1;
    let mut groups = Vec::with_capacity(pieces.len() + 1);

    for (i, piece) in pieces.into_iter().enumerate() {
        if allow_ipv4_tail && i == last && piece.contains('.') {
            groups.extend(embedded_ipv4(address, piece)?);
        } else if (1..=4).contains(&piece.len()) && piece.bytes().all(|b| b.is_ascii_hexdigit()) {
            groups.push(format!("{:0>4}", piece));
        } else {
            return Err(AddressError::invalid(address));
        }
    }

    Ok(groups)
}

/// Convert a dotted-quad tail into the two hex groups it occupies.
fn embedded_ipv4(address: &str, tail: &str) -> Result<[String; 2]> {
    let mut octets = [0u8; 4];
    let mut parts = tail.split('.');

    for octet in &mut octets {
        *octet = parts
            .next()
            .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| AddressError::invalid(address))?;
    }
    if parts.next().is_some() {
        return Err(AddressError::invalid(address));
    }

    Ok([
        format!("{:02x}{:02x}", octets[0], octets[1]),
        format!("{:02x}{:02x}", octets[2], octets[3]),
    ])
}

fn malformed(address: &str, groups: usize) -> AddressError {
    AddressError::MalformedIpv6 {
        address: address.to_string(),
        groups,
    }
}
