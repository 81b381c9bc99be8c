//! Challenge request model
//!
//! A [`ChallengeRequest`] is what the host runtime hands to a solver for a
//! single Present or CleanUp call. Names arrive fully qualified; solvers work
//! with the zone name and the record label relative to it.

use serde::{Deserialize, Serialize};

/// A single DNS-01 challenge, as delivered by the host runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Solver-specific configuration payload (issuer config), if any
    #[serde(default)]
    pub config: Option<serde_json::Value>,

    /// Zone the challenge record lives in, e.g. `example.com.`
    pub resolved_zone: String,

    /// Fully qualified challenge record name, e.g. `_acme-challenge.example.com.`
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,

    /// TXT value to present or retract
    pub key: String,

    /// Namespace secrets referenced by `config` are resolved in
    #[serde(default)]
    pub resource_namespace: String,

    /// Whether credentials may come from the process environment
    #[serde(default)]
    pub allow_ambient_credentials: bool,
}

impl ChallengeRequest {
    /// Create a request without solver configuration
    pub fn new(
        resolved_zone: impl Into<String>,
        resolved_fqdn: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            resolved_zone: resolved_zone.into(),
            resolved_fqdn: resolved_fqdn.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Attach a solver configuration payload
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the namespace used for secret lookups
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.resource_namespace = namespace.into();
        self
    }

    /// Allow or forbid ambient credentials
    pub fn with_ambient_credentials(mut self, allow: bool) -> Self {
        self.allow_ambient_credentials = allow;
        self
    }

    /// Zone name without the trailing root label
    pub fn domain(&self) -> &str {
        un_fqdn(&self.resolved_zone)
    }

    /// Record label relative to [`domain`](Self::domain)
    pub fn subdomain(&self) -> &str {
        sub_domain(self.domain(), &self.resolved_fqdn)
    }
}

/// Strip a single trailing `.` from a fully qualified name
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Compute the record label for `fqdn` relative to `domain`
///
/// `_acme-challenge.example.com.` in `example.com` yields `_acme-challenge`.
/// When `fqdn` does not end in `.<domain>`, the whole trimmed name is
/// returned.
pub fn sub_domain<'a>(domain: &str, fqdn: &'a str) -> &'a str {
    let trimmed = un_fqdn(fqdn);
    trimmed
        .strip_suffix(domain)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|label| !label.is_empty())
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomain_is_label_before_zone() {
        assert_eq!(
            sub_domain("example.com", "_acme-challenge.example.com."),
            "_acme-challenge"
        );
        assert_eq!(
            sub_domain("example.com", "_acme-challenge.www.example.com"),
            "_acme-challenge.www"
        );
    }

    #[test]
    fn subdomain_falls_back_to_trimmed_fqdn() {
        assert_eq!(
            sub_domain("example.com", "_acme-challenge.example.org."),
            "_acme-challenge.example.org"
        );
        // zone name must be preceded by a dot
        assert_eq!(
            sub_domain("example.com", "_acme-challenge.myexample.com."),
            "_acme-challenge.myexample.com"
        );
        assert_eq!(sub_domain("example.com", "example.com."), "example.com");
    }

    #[test]
    fn un_fqdn_strips_one_dot() {
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
    }

    #[test]
    fn request_derives_domain_and_subdomain() {
        let request =
            ChallengeRequest::new("example.com.", "_acme-challenge.example.com.", "abc123");
        assert_eq!(request.domain(), "example.com");
        assert_eq!(request.subdomain(), "_acme-challenge");
    }

    #[test]
    fn request_decodes_from_camel_case_json() {
        let request: ChallengeRequest = serde_json::from_value(serde_json::json!({
            "resolvedZone": "example.com.",
            "resolvedFQDN": "_acme-challenge.example.com.",
            "key": "abc123",
            "resourceNamespace": "cert-manager",
            "allowAmbientCredentials": true,
            "config": { "endpoint": "https://dns.example" }
        }))
        .unwrap();

        assert_eq!(request.resource_namespace, "cert-manager");
        assert!(request.allow_ambient_credentials);
        assert_eq!(request.subdomain(), "_acme-challenge");
        assert!(request.config.is_some());
    }
}
