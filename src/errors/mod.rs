/// Context for feed request errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Context for malformed feed payloads
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Context for store errors
pub fn store_context(operation: &str, key: &str) -> String {
    format!("Store operation '{}' failed for key: {}", operation, key)
}
