use axum::{
    Router,
    extract::{ConnectInfo, Path},
    http::StatusCode,
    response::Json,
    routing::get,
};
use ipreverse::{
    AddressFamily, ClientAddress, ClientAddressExtractor, ClientAddressLayer, expand_ipv6,
    reverse_ip,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_app();
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    println!("Server starting on http://localhost:3000");
    println!("Test endpoints:");
    println!("  • GET /ip                - Client address and its reversed form");
    println!("  • GET /reverse/{{address}} - Reverse any address");
    println!("  • GET /cf/ip             - Client address read from CF-Connecting-IP");
    println!("  • GET /debug             - Connection info next to the extracted address");
    println!();
    println!("Test with headers:");
    println!("  curl -H 'X-Forwarded-For: 198.51.100.1, 192.168.1.1' http://localhost:3000/ip");
    println!("  curl http://localhost:3000/reverse/2001:db8::8a2e:370:7334");
    println!("  curl -H 'CF-Connecting-IP: 192.0.2.100' http://localhost:3000/cf/ip");
    println!();

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

fn create_app() -> Router {
    let default_router = Router::new()
        .route("/ip", get(ip_handler))
        .route("/debug", get(debug_handler))
        .layer(ClientAddressLayer::default());

    let cf_layer = ClientAddressLayer::with_extractor(
        ClientAddressExtractor::new().with_real_ip_header("cf-connecting-ip"),
    );
    let cf_router = Router::new().route("/ip", get(ip_handler)).layer(cf_layer);

    Router::new()
        .merge(default_router)
        .nest("/cf", cf_router)
        .route("/reverse/{address}", get(reverse_handler))
}

/// Handler that returns the client address in JSON format
async fn ip_handler(client: ClientAddress) -> Json<serde_json::Value> {
    let address = client.address();

    Json(json!({
        "client_address": address,
        "family": AddressFamily::classify(address).map(|f| f.to_string()),
        "reversed": client.reversed().ok(),
    }))
}

/// Handler that reverses an address given in the path
async fn reverse_handler(
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match reverse_ip(&address) {
        Ok(reversed) => Ok(Json(json!({
            "address": address,
            "expanded": expand_ipv6(&address).ok().filter(|_| {
                AddressFamily::classify(&address) == Some(AddressFamily::V6)
            }),
            "reversed": reversed,
        }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// Debug handler showing connection information
async fn debug_handler(
    client: ClientAddress,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: axum::http::HeaderMap,
) -> Json<serde_json::Value> {
    let mut ip_headers = std::collections::HashMap::new();

    for header_name in ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"] {
        if let Some(value_str) = headers.get(header_name).and_then(|v| v.to_str().ok()) {
            ip_headers.insert(header_name, value_str.to_string());
        }
    }

    Json(json!({
        "client_address": client.address(),
        "valid": client.is_valid(),
        "connection_info": {
            "remote_addr": addr.to_string(),
            "remote_ip": addr.ip().to_string(),
            "remote_port": addr.port(),
        },
        "ip_related_headers": ip_headers,
    }))
}
