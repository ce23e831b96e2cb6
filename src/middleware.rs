use axum::{
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
    response::Response,
};
use futures_util::future::BoxFuture;
use std::{
    convert::Infallible,
    net::SocketAddr,
    task::{Context, Poll},
};
use tower::{Layer, Service};

use crate::classify::is_valid_ip;
use crate::error::Result;
use crate::extractor::ClientAddressExtractor;
use crate::reverse::reverse_ip;

/// Extension that holds the extracted client address.
///
/// The address is whatever the extractor picked, possibly `"unknown"`, and
/// has not been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl ClientAddress {
    /// Get the address text.
    pub fn address(&self) -> &str {
        &self.0
    }

    /// Whether the address is a valid IPv4 or IPv6 address.
    pub fn is_valid(&self) -> bool {
        is_valid_ip(&self.0)
    }

    /// The reversed form of the address.
    pub fn reversed(&self) -> Result<String> {
        reverse_ip(&self.0)
    }
}

/// Layer for extracting client addresses from HTTP requests.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use ipreverse::{ClientAddress, ClientAddressLayer};
///
/// async fn handler(client: ClientAddress) -> String {
///     client.address().to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(ClientAddressLayer::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientAddressLayer {
    extractor: ClientAddressExtractor,
}

impl ClientAddressLayer {
    /// Create a new layer reading the default headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new layer with custom header configuration.
    pub fn with_extractor(extractor: ClientAddressExtractor) -> Self {
        Self { extractor }
    }
}

impl<S> Layer<S> for ClientAddressLayer {
    type Service = ClientAddressService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientAddressService {
            inner,
            extractor: self.extractor.clone(),
        }
    }
}

/// Service that stores the client address as a request extension.
#[derive(Debug, Clone)]
pub struct ClientAddressService<S> {
    inner: S,
    extractor: ClientAddressExtractor,
}

impl<S> Service<Request> for ClientAddressService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|connect_info| connect_info.0.ip().to_string());

        let address = extract(&self.extractor, req.headers(), remote_addr);
        req.extensions_mut().insert(ClientAddress(address));

        let future = self.inner.call(req);
        Box::pin(future)
    }
}

fn extract(
    extractor: &ClientAddressExtractor,
    headers: &HeaderMap,
    remote_addr: Option<String>,
) -> String {
    extractor.extract(&headers_to_map(headers), remote_addr)
}

/// Convert Axum headers to our internal header map format.
fn headers_to_map(headers: &HeaderMap) -> crate::extractor::HeaderMap {
    let mut map = std::collections::HashMap::new();

    for (name, value) in headers.iter() {
        if let Ok(value_str) = value.to_str() {
            // Repeated headers keep their first value.
            map.entry(name.as_str().to_lowercase())
                .or_insert_with(|| value_str.to_string());
        }
    }

    map
}

/// Axum extractor for the client address.
///
/// Uses the value stored by [`ClientAddressLayer`] when present, otherwise
/// runs the default extractor over the request parts. Never rejects.
impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(client) = parts.extensions.get::<ClientAddress>() {
            return Ok(client.clone());
        }

        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|connect_info| connect_info.0.ip().to_string());

        Ok(ClientAddress(extract(
            &ClientAddressExtractor::default(),
            &parts.headers,
            remote_addr,
        )))
    }
}
