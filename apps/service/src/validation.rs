use std::net::IpAddr;

/// Validation results with specific error messages
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(msg.into()) }
    }
}

/// Validate a probe target (IP address or hostname)
///
/// Syntactic check only; name resolution happens at probe time so a host
/// that is temporarily unresolvable still counts as a probe error, not a
/// configuration error.
pub fn validate_host(target: &str) -> ValidationResult {
    if target.trim().is_empty() {
        return ValidationResult::err("Host cannot be empty");
    }

    // Try to parse as IP address
    if target.parse::<IpAddr>().is_ok() {
        return ValidationResult::ok();
    }

    if target.contains(' ') {
        return ValidationResult::err("Host cannot contain spaces");
    }

    if target.starts_with('-') || target.ends_with('-') {
        return ValidationResult::err("Hostname cannot start or end with hyphen");
    }

    if target.chars().all(|c| c.is_alphanumeric() || c == '.' || c == '-') {
        ValidationResult::ok()
    } else {
        ValidationResult::err("Invalid hostname. Use IP address or valid hostname")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ip_literals() {
        assert!(validate_host("192.168.1.10").is_valid);
        assert!(validate_host("2001:db8::1").is_valid);
    }

    #[test]
    fn accepts_hostnames() {
        assert!(validate_host("gateway").is_valid);
        assert!(validate_host("db-01.internal.example.com").is_valid);
    }

    #[test]
    fn rejects_blank_and_malformed_hosts() {
        assert!(!validate_host("").is_valid);
        assert!(!validate_host("   ").is_valid);
        assert!(!validate_host("two words").is_valid);
        assert!(!validate_host("-leading.example").is_valid);
        assert!(!validate_host("bad_host!").is_valid);
    }
}
