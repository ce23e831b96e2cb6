use thiserror::Error;

/// Result type alias for operations that may fail with `AddressError`.
pub type Result<T> = std::result::Result<T, AddressError>;

/// Errors raised while reversing or expanding an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The input is not a valid address of the requested family.
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// The IPv6 groups do not add up to eight after expansion.
    #[error("IPv6 address {address} does not expand to 8 groups (found {groups})")]
    MalformedIpv6 { address: String, groups: usize },
}

impl AddressError {
    pub(crate) fn invalid(address: &str) -> Self {
        AddressError::InvalidAddress(address.to_string())
    }
}
