use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::expand::ExpandedIpv6;

// Leading zeros are accepted: "01" and "001" are valid octets.
const IPV4_OCTET: &str = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
// Dotted-quad tail inside an IPv6 address.
const IPV6_TAIL_OCTET: &str = "(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])";
const HEX_GROUP: &str = "[0-9a-fA-F]{1,4}";

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{o}\.){{3}}{o}$", o = IPV4_OCTET);
    Regex::new(&pattern).expect("IPv4 pattern compiles")
});

static IPV6: LazyLock<Regex> = LazyLock::new(|| {
    let h = HEX_GROUP;
    let v4 = format!(r"(?:{o}\.){{3}}{o}", o = IPV6_TAIL_OCTET);
    let alternatives = [
        format!("(?:{h}:){{7}}{h}"),
        format!("(?:{h}:){{1,7}}:"),
        format!("(?:{h}:){{1,6}}:{h}"),
        format!("(?:{h}:){{1,5}}(?::{h}){{1,2}}"),
        format!("(?:{h}:){{1,4}}(?::{h}){{1,3}}"),
        format!("(?:{h}:){{1,3}}(?::{h}){{1,4}}"),
        format!("(?:{h}:){{1,2}}(?::{h}){{1,5}}"),
        format!("{h}:(?::{h}){{1,6}}"),
        format!(":(?:(?::{h}){{1,7}}|:)"),
        "fe80:(?::[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]+".to_string(),
        format!("::(?:ffff(?::0{{1,4}})?:)?{v4}"),
        format!("(?:{h}:){{1,4}}:{v4}"),
    ];
    let pattern = format!("^(?:{})$", alternatives.join("|"));
    Regex::new(&pattern).expect("IPv6 pattern compiles")
});

/// Address family, decided purely by which grammar the text matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Classify a string, or `None` if it is neither IPv4 nor IPv6.
    pub fn classify(s: &str) -> Option<Self> {
        if is_valid_ipv4(s) {
            Some(AddressFamily::V4)
        } else if is_valid_ipv6(s) {
            Some(AddressFamily::V6)
        } else {
            None
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// Check for four dot-separated decimal octets, each 0-255 and at most 3 digits.
pub fn is_valid_ipv4(s: &str) -> bool {
    IPV4.is_match(s)
}

/// Check for a textual IPv6 address.
///
/// Accepts every `::` placement, `fe80:` link-local addresses with a `%zone`,
/// and dotted-quad tails such as `::ffff:10.0.0.1`. The pattern match is
/// followed by a group count check, so a second `::` or a ninth group is
/// rejected even where the pattern alone would let it through.
pub fn is_valid_ipv6(s: &str) -> bool {
    IPV6.is_match(s) && ExpandedIpv6::parse(s).is_ok()
}

/// Check whether `s` is a valid IPv4 or IPv6 address.
///
/// ```rust
/// use ipreverse::is_valid_ip;
///
/// assert!(is_valid_ip("::1"));
/// assert!(!is_valid_ip("256.1.1.1"));
/// ```
pub fn is_valid_ip(s: &str) -> bool {
    is_valid_ipv4(s) || is_valid_ipv6(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_accepts_dotted_quads() {
        for addr in ["192.168.6.5", "0.0.0.0", "255.255.255.255", "10.0.20.21"] {
            assert!(is_valid_ipv4(addr), "{addr}");
        }
    }

    #[test]
    fn test_ipv4_accepts_leading_zeros() {
        assert!(is_valid_ipv4("01.002.3.4"));
        assert!(is_valid_ipv4("000.00.0.199"));
    }

    #[test]
    fn test_ipv4_rejects_malformed() {
        for addr in [
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.0004",
            " 1.2.3.4",
            "1.2.3.4\n",
            "1..2.3",
            "1.2.3.-4",
            "a.b.c.d",
            "",
        ] {
            assert!(!is_valid_ipv4(addr), "{addr:?}");
        }
    }

    #[test]
    fn test_ipv4_rejects_non_ascii_digits() {
        assert!(!is_valid_ipv4("١.2.3.4"));
    }

    #[test]
    fn test_ipv6_accepts_compression_placements() {
        for addr in [
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            "2001:db8::8a2e:370:7334",
            "::1",
            "::",
            "1::",
            "1:2:3:4:5:6:7::",
            "1::2:3:4:5:6:7",
            "FE80::ABCD",
        ] {
            assert!(is_valid_ipv6(addr), "{addr}");
        }
    }

    #[test]
    fn test_ipv6_accepts_zone_and_ipv4_tail() {
        for addr in [
            "fe80::1%eth0",
            "fe80::7:8%1",
            "::ffff:192.168.1.1",
            "::ffff:0:10.0.0.1",
            "::10.0.0.1",
            "64:ff9b::192.0.2.33",
        ] {
            assert!(is_valid_ipv6(addr), "{addr}");
        }
    }

    #[test]
    fn test_ipv6_rejects_malformed() {
        for addr in [
            "1::2::3",
            ":::",
            "12345::1",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "gggg::1",
            "fe80:1:2:3:4%eth0",
            "fe80:::1%eth0",
            "::1%lo",
            "::ffff:256.1.1.1",
            "192.168.1.1",
            "",
        ] {
            assert!(!is_valid_ipv6(addr), "{addr:?}");
        }
    }

    #[test]
    fn test_is_valid_ip() {
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not-an-ip"));
        assert!(is_valid_ip("127.0.0.1"));
    }

    #[test]
    fn test_classify_family() {
        assert_eq!(AddressFamily::classify("127.0.0.1"), Some(AddressFamily::V4));
        assert_eq!(AddressFamily::classify("::1"), Some(AddressFamily::V6));
        assert_eq!(AddressFamily::classify("localhost"), None);
        assert_eq!(AddressFamily::V6.to_string(), "IPv6");
    }
}
