//! # IP Address Reversal
//!
//! A small library for validating textual IPv4 and IPv6 addresses, expanding
//! compressed IPv6 notation, reversing addresses octet-by-octet or
//! group-by-group, and picking the client address out of proxy headers.
//!
//! ## Features
//!
//! - Grammar-level validation of IPv4 (lenient leading zeros) and IPv6
//!   (every `::` placement, `fe80::/10` zone indices, dotted-quad tails)
//! - Expansion of IPv6 addresses to eight four-digit groups
//! - Reversal of IPv4 octet order and IPv6 group order
//! - Client address extraction from `X-Forwarded-For`, `X-Real-IP` and the
//!   connection address, with `::ffff:` prefix stripping
//! - Optional Axum middleware and extractor integration via the `axum` feature
//!
//! ## Examples
//!
//! ### Reversing
//!
//! ```rust
//! use ipreverse::{is_valid_ip, reverse_ip};
//!
//! assert!(is_valid_ip("192.168.6.5"));
//! assert_eq!(reverse_ip("192.168.6.5").unwrap(), "5.6.168.192");
//! assert_eq!(
//!     reverse_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334").unwrap(),
//!     "7334:0370:8a2e:0000:0000:85a3:0db8:2001"
//! );
//! assert!(reverse_ip("not-an-ip").is_err());
//! ```
//!
//! ### Client address
//!
//! ```rust
//! use ipreverse::{ClientAddressExtractor, HeaderMap, reverse_ip};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("x-forwarded-for".to_string(), "10.0.20.21, 5.5.5.5".to_string());
//!
//! let client = ClientAddressExtractor::default().extract(&headers, Some("127.0.0.1".to_string()));
//! assert_eq!(client, "10.0.20.21");
//! assert_eq!(reverse_ip(&client).unwrap(), "21.20.0.10");
//! ```

pub mod classify;
pub mod error;
pub mod expand;
pub mod extractor;
pub mod reverse;

#[cfg(feature = "axum")]
pub mod middleware;

pub use classify::{AddressFamily, is_valid_ip, is_valid_ipv4, is_valid_ipv6};
pub use error::{AddressError, Result};
pub use expand::{ExpandedIpv6, expand_ipv6};
pub use extractor::{
    CandidateSource, ClientAddressCandidates, ClientAddressExtractor, ClientAddressSource,
    HeaderMap, MAPPED_PREFIX, UNKNOWN, extract_client_address, extract_from, normalize_ip,
    select_candidate,
};
pub use reverse::{reverse_ip, reverse_ipv4, reverse_ipv6};

#[cfg(feature = "axum")]
pub use middleware::{ClientAddress, ClientAddressLayer, ClientAddressService};
