use std::collections::HashMap;
use std::fmt;

/// Type alias for header maps. Can be any map-like structure with string keys and values.
pub type HeaderMap = HashMap<String, String>;

/// Returned when no candidate address is available.
pub const UNKNOWN: &str = "unknown";

/// Prefix of an IPv4-mapped IPv6 address.
pub const MAPPED_PREFIX: &str = "::ffff:";

/// The three inputs the client address is derived from.
///
/// Implement this for whatever request type a transport hands you; the
/// extractor never looks at anything else.
pub trait ClientAddressSource {
    /// Raw value of the forwarded-chain header (`"client, proxy1, proxy2"`).
    fn forwarded(&self) -> Option<&str>;

    /// Raw value of the real-ip header.
    fn real_ip(&self) -> Option<&str>;

    /// Address of the peer on the underlying connection.
    fn remote_addr(&self) -> Option<&str>;
}

/// Owned set of candidates, for callers that collect them up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAddressCandidates {
    pub forwarded: Option<String>,
    pub real_ip: Option<String>,
    pub remote_addr: Option<String>,
}

impl ClientAddressSource for ClientAddressCandidates {
    fn forwarded(&self) -> Option<&str> {
        self.forwarded.as_deref()
    }

    fn real_ip(&self) -> Option<&str> {
        self.real_ip.as_deref()
    }

    fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }
}

/// Which candidate the client address was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    Forwarded,
    RealIp,
    Connection,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Forwarded => f.write_str("forwarded"),
            CandidateSource::RealIp => f.write_str("real-ip"),
            CandidateSource::Connection => f.write_str("connection"),
        }
    }
}

/// Configuration for which headers carry the client address.
#[derive(Debug, Clone)]
pub struct ClientAddressExtractor {
    /// Header holding the comma-separated forwarding chain.
    pub forwarded_header: String,
    /// Header holding a single client address set by the proxy.
    pub real_ip_header: String,
}

impl Default for ClientAddressExtractor {
    fn default() -> Self {
        Self {
            forwarded_header: "x-forwarded-for".to_string(),
            real_ip_header: "x-real-ip".to_string(),
        }
    }
}

impl ClientAddressExtractor {
    /// Create a new extractor reading `x-forwarded-for` and `x-real-ip`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header holding the forwarding chain.
    pub fn with_forwarded_header(mut self, name: impl Into<String>) -> Self {
        self.forwarded_header = name.into();
        self
    }

    /// Set the header holding the real client address.
    pub fn with_real_ip_header(mut self, name: impl Into<String>) -> Self {
        self.real_ip_header = name.into();
        self
    }

    /// Gather the candidates from a header map and the connection address.
    pub fn candidates(
        &self,
        headers: &HeaderMap,
        remote_addr: Option<String>,
    ) -> ClientAddressCandidates {
        ClientAddressCandidates {
            forwarded: header(headers, &self.forwarded_header),
            real_ip: header(headers, &self.real_ip_header),
            remote_addr,
        }
    }

    /// Extract the client address, or `"unknown"` if there is nothing to go on.
    pub fn extract(&self, headers: &HeaderMap, remote_addr: Option<String>) -> String {
        extract_from(&self.candidates(headers, remote_addr))
    }
}

/// Look a header up by exact name, then case-insensitively.
fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .cloned()
}

/// Pick the client address in priority order: forwarded chain, real-ip, connection.
///
/// Nothing is validated here. Empty values count as absent.
pub fn select_candidate<S>(source: &S) -> Option<(CandidateSource, String)>
where
    S: ClientAddressSource + ?Sized,
{
    let selected = if let Some(forwarded) = source.forwarded().filter(|v| !v.is_empty()) {
        // Only the first hop is the client; later entries are proxies.
        let first = forwarded.split(',').next().unwrap_or(forwarded).trim();
        Some((CandidateSource::Forwarded, first.to_string()))
    } else if let Some(real_ip) = source.real_ip().filter(|v| !v.is_empty()) {
        Some((CandidateSource::RealIp, real_ip.to_string()))
    } else {
        source
            .remote_addr()
            .filter(|v| !v.is_empty())
            .map(|remote| (CandidateSource::Connection, normalize_ip(remote).to_string()))
    };

    match &selected {
        Some((from, address)) => tracing::trace!(%from, address = %address, "selected client address"),
        None => tracing::trace!("no client address candidate available"),
    }

    selected
}

/// Resolve the client address from any [`ClientAddressSource`].
pub fn extract_from<S>(source: &S) -> String
where
    S: ClientAddressSource + ?Sized,
{
    select_candidate(source)
        .map(|(_, address)| address)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Extract the client address from raw header values and the connection address.
///
/// # Arguments
///
/// * `forwarded` - Value of the forwarding-chain header; its first entry wins
/// * `real_ip` - Value of the real-ip header
/// * `remote_addr` - Address of the connection peer
///
/// # Examples
///
/// ```rust
/// use ipreverse::extract_client_address;
///
/// assert_eq!(extract_client_address(Some("10.0.20.21, 5.5.5.5"), None, None), "10.0.20.21");
/// assert_eq!(extract_client_address(None, None, Some("::ffff:192.168.1.1")), "192.168.1.1");
/// assert_eq!(extract_client_address(None, None, None), "unknown");
/// ```
pub fn extract_client_address(
    forwarded: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: Option<&str>,
) -> String {
    struct Borrowed<'a> {
        forwarded: Option<&'a str>,
        real_ip: Option<&'a str>,
        remote_addr: Option<&'a str>,
    }

    impl ClientAddressSource for Borrowed<'_> {
        fn forwarded(&self) -> Option<&str> {
            self.forwarded
        }

        fn real_ip(&self) -> Option<&str> {
            self.real_ip
        }

        fn remote_addr(&self) -> Option<&str> {
            self.remote_addr
        }
    }

    extract_from(&Borrowed {
        forwarded,
        real_ip,
        remote_addr,
    })
}

/// Strip a leading `::ffff:` from an address.
///
/// This is a plain prefix check: the remainder is not validated.
pub fn normalize_ip(address: &str) -> &str {
    address.strip_prefix(MAPPED_PREFIX).unwrap_or(address)
}
