use ipreverse::{
    ClientAddressExtractor, expand_ipv6, extract_client_address, is_valid_ip, normalize_ip,
    reverse_ip,
};
use std::collections::HashMap;

fn main() {
    println!("=== IP Reversal Examples ===\n");

    // Example 1: Validation
    example_1_validation();

    // Example 2: IPv4 reversal
    example_2_reverse_ipv4();

    // Example 3: IPv6 expansion and reversal
    example_3_reverse_ipv6();

    // Example 4: Client address from headers
    example_4_client_address();

    // Example 5: Mapped address normalization
    example_5_normalize();

    println!("=== All examples completed! ===");
}

fn example_1_validation() {
    println!("Example 1: Validation");

    for addr in ["192.168.6.5", "01.002.3.4", "256.1.1.1", "::1", "fe80::1%eth0", "not-an-ip"] {
        println!("  {:<16} valid: {}", addr, is_valid_ip(addr));
    }
    println!();
}

fn example_2_reverse_ipv4() {
    println!("Example 2: IPv4 reversal");

    for addr in ["192.168.6.5", "01.002.3.4"] {
        match reverse_ip(addr) {
            Ok(reversed) => println!("  {} -> {}", addr, reversed),
            Err(e) => println!("  {}: {}", addr, e),
        }
    }
    println!();
}

fn example_3_reverse_ipv6() {
    println!("Example 3: IPv6 expansion and reversal");

    let addr = "2001:db8::8a2e:370:7334";
    match expand_ipv6(addr) {
        Ok(expanded) => println!("  expanded: {}", expanded),
        Err(e) => println!("  {}", e),
    }
    match reverse_ip(addr) {
        Ok(reversed) => println!("  reversed: {}", reversed),
        Err(e) => println!("  {}", e),
    }

    match reverse_ip("not-an-ip") {
        Ok(reversed) => println!("  unexpected: {}", reversed),
        Err(e) => println!("  rejected: {}", e),
    }
    println!();
}

fn example_4_client_address() {
    println!("Example 4: Client address from headers");

    println!(
        "  forwarded chain: {}",
        extract_client_address(Some("10.0.20.21, 5.5.5.5"), None, None)
    );
    println!(
        "  connection only: {}",
        extract_client_address(None, None, Some("::ffff:192.168.1.1"))
    );
    println!("  nothing: {}", extract_client_address(None, None, None));

    let mut headers = HashMap::new();
    headers.insert("cf-connecting-ip".to_string(), "198.51.100.42".to_string());

    let extractor = ClientAddressExtractor::new().with_real_ip_header("cf-connecting-ip");
    println!("  custom header: {}", extractor.extract(&headers, None));
    println!();
}

fn example_5_normalize() {
    println!("Example 5: Mapped address normalization");

    for addr in ["::ffff:10.0.0.5", "10.0.0.5"] {
        println!("  {} -> {}", addr, normalize_ip(addr));
    }
    println!();
}
