//! Validation utilities for CLI arguments

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a server base URL: scheme plus host, no trailing slash we would
/// double when joining API paths
pub fn validate_base_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        Some(_) => Err(format!("Base URL '{}' has no host", url)),
        None => Err(format!(
            "Base URL '{}' must start with http:// or https://",
            url
        )),
    }
}
