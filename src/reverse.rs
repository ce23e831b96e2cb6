use crate::classify::{AddressFamily, is_valid_ipv4, is_valid_ipv6};
use crate::error::{AddressError, Result};
use crate::expand::ExpandedIpv6;

/// Reverse the octet order of an IPv4 address.
///
/// Octets are moved, never renumbered, so `"01.002.3.4"` becomes `"4.3.002.01"`.
pub fn reverse_ipv4(address: &str) -> Result<String> {
    if !is_valid_ipv4(address) {
        tracing::debug!(address, "rejecting reversal of invalid IPv4 address");
        return Err(AddressError::invalid(address));
    }

    let mut octets: Vec<&str> = address.split('.').collect();
    octets.reverse();
    Ok(octets.join("."))
}

/// Reverse the group order of an IPv6 address.
///
/// The result is always the fully expanded form; `::` is never reapplied.
pub fn reverse_ipv6(address: &str) -> Result<String> {
    if !is_valid_ipv6(address) {
        tracing::debug!(address, "rejecting reversal of invalid IPv6 address");
        return Err(AddressError::invalid(address));
    }

    let expanded = ExpandedIpv6::parse(address)?;
    Ok(expanded.reversed().to_string())
}

/// Reverse any valid IPv4 or IPv6 address.
///
/// Validates on its own, so callers do not need to check first.
///
/// # Examples
///
/// ```rust
/// use ipreverse::{AddressError, reverse_ip};
///
/// assert_eq!(reverse_ip("192.168.6.5").unwrap(), "5.6.168.192");
/// assert_eq!(
///     reverse_ip("not-an-ip"),
///     Err(AddressError::InvalidAddress("not-an-ip".to_string()))
/// );
/// ```
pub fn reverse_ip(address: &str) -> Result<String> {
    match AddressFamily::classify(address) {
        Some(AddressFamily::V4) => reverse_ipv4(address),
        Some(AddressFamily::V6) => reverse_ipv6(address),
        None => {
            tracing::debug!(address, "rejecting reversal of unrecognized address");
            Err(AddressError::invalid(address))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_ipv4() {
        assert_eq!(reverse_ipv4("192.168.6.5").unwrap(), "5.6.168.192");
        assert_eq!(reverse_ipv4("10.0.20.21").unwrap(), "21.20.0.10");
    }

    #[test]
    fn test_reverse_ipv4_keeps_leading_zeros() {
        assert_eq!(reverse_ipv4("01.002.3.4").unwrap(), "4.3.002.01");
    }

    #[test]
    fn test_reverse_ipv4_rejects_invalid() {
        assert_eq!(
            reverse_ipv4("256.1.1.1"),
            Err(AddressError::InvalidAddress("256.1.1.1".to_string()))
        );
        assert!(reverse_ipv4("::1").is_err());
    }

    #[test]
    fn test_reverse_ipv6_full_form() {
        assert_eq!(
            reverse_ipv6("2001:0db8:85a3:0000:0000:8a2e:0370:7334").unwrap(),
            "7334:0370:8a2e:0000:0000:85a3:0db8:2001"
        );
    }

    #[test]
    fn test_reverse_ipv6_expands_compressed_input() {
        assert_eq!(
            reverse_ipv6("::1").unwrap(),
            "0001:0000:0000:0000:0000:0000:0000:0000"
        );
        assert_eq!(
            reverse_ipv6("fe80::1%eth0").unwrap(),
            "0001:0000:0000:0000:0000:0000:0000:fe80%eth0"
        );
    }

    #[test]
    fn test_reverse_ipv6_rejects_invalid() {
        assert!(reverse_ipv6("1::2::3").is_err());
        assert!(reverse_ipv6("192.168.1.1").is_err());
    }

    #[test]
    fn test_reverse_ip_dispatches() {
        assert_eq!(reverse_ip("1.2.3.4").unwrap(), "4.3.2.1");
        assert_eq!(
            reverse_ip("2001:db8::8a2e:370:7334").unwrap(),
            "7334:0370:8a2e:0000:0000:0000:0db8:2001"
        );
    }

    #[test]
    fn test_reverse_ip_rejects_garbage() {
        assert_eq!(
            reverse_ip("not-an-ip"),
            Err(AddressError::InvalidAddress("not-an-ip".to_string()))
        );
        assert!(reverse_ip("").is_err());
    }

    #[test]
    fn test_double_reverse_restores_expanded_ipv6() {
        let expanded = "2001:0db8:85a3:0000:0000:8a2e:0370:7334";
        let once = reverse_ip(expanded).unwrap();
        assert_eq!(reverse_ip(&once).unwrap(), expanded);
    }

    #[test]
    fn test_double_reverse_does_not_restore_compressed_ipv6() {
        let compressed = "2001:db8::1";
        let twice = reverse_ip(&reverse_ip(compressed).unwrap()).unwrap();
        assert_ne!(twice, compressed);
        assert_eq!(twice, "2001:0db8:0000:0000:0000:0000:0000:0001");
    }

    #[test]
    fn test_double_reverse_ipv4_is_positional() {
        let addr = "01.002.3.4";
        assert_eq!(reverse_ip(&reverse_ip(addr).unwrap()).unwrap(), addr);
    }
}
