//! Validation helpers for invocation parameters.

use reqwest::Url;

/// Validates that `url` is an absolute http(s) URL.
///
/// # Errors
/// Returns a message describing why the URL cannot be used.
pub fn validate_base_url(url: &str) -> Result<(), String> {
    let parsed = Url::parse(url).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if parsed.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_base_url("http://localhost:3000").is_ok());
        assert!(validate_base_url("https://my-stack.grafana.net").is_ok());
        assert!(validate_base_url("https://example.com/grafana/").is_ok());
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(validate_base_url("my-stack.grafana.net").is_err());
        assert!(validate_base_url("").is_err());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate_base_url("ftp://example.com").unwrap_err();
        assert!(err.contains("ftp"));
    }
}
