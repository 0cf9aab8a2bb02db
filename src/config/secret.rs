//! Secret string wrapper that never appears in logs.

/// Wrapper for the Grafana session token.
///
/// The `Debug` and `Display` implementations always show `[REDACTED]`, so the
/// token can sit inside configuration structs that get logged.
///
/// # Example
///
/// ```
/// use migalert::config::SecretString;
///
/// let secret = SecretString::new("0a1b2c3d".to_string());
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose(), "0a1b2c3d");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: String) -> Self {
        SecretString(s)
    }

    /// Exposes the underlying secret value.
    ///
    /// Only for building the request cookie; never pass the result to logging.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}
