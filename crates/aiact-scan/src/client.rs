// crates/aiact-scan/src/client.rs
// ============================================================================
// Module: Scan Client
// Description: Blocking HTTP client for the prompt-injection scoring API.
// Purpose: Issue bounded scoring requests and map failures to Unverified.
// Dependencies: crate::report, reqwest, serde, thiserror
// ============================================================================

//! ## Overview
//! The client POSTs raw text to the scoring API and normalizes the response
//! through [`crate::report`]. Construction can fail (bad base URL, client
//! build); analysis cannot: every failure after construction becomes an
//! `Unverified` report so the caller never loses the distinction between
//! "not flagged" and "could not verify".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::report::DEFAULT_THRESHOLD;
use crate::report::ScanReport;
use crate::report::normalize_payload;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the scan client.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` base URLs.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
/// - Requests without both `api_token` and `analysis_id` are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Base URL of the scoring API.
    pub base_url: String,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Bearer token for the scoring API.
    pub api_token: Option<String>,
    /// Analysis identifier assigned by the scoring API.
    pub analysis_id: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sonnylabs-service.onrender.com".to_string(),
            allow_http: false,
            timeout_ms: 5_000,
            max_response_bytes: 1024 * 1024,
            user_agent: "aiact/0.1".to_string(),
            api_token: None,
            analysis_id: None,
        }
    }
}

/// Errors raised while constructing the scan client.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configured base URL could not be parsed or used.
    #[error("scan base_url is invalid: {0}")]
    InvalidBaseUrl(String),
    /// The underlying HTTP client could not be built.
    #[error("scan http client build failed")]
    ClientBuild,
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// One text-analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Text to analyze.
    pub text: String,
    /// Flagging threshold; defaults to [`DEFAULT_THRESHOLD`] when absent.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Correlation tag echoed back in the report.
    #[serde(default)]
    pub tag: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for the prompt-injection scoring API.
///
/// # Invariants
/// - Redirects are never followed.
/// - `analyze` and `check_file_access` are infallible; failures become
///   `Unverified` reports.
pub struct ScanClient {
    /// Client configuration, including limits and credentials.
    config: ScanConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ScanClient {
    /// Creates a new scan client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the base URL is invalid, uses a disallowed
    /// scheme, or the HTTP client cannot be built.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let url = Url::parse(&config.base_url)
            .map_err(|_| ScanError::InvalidBaseUrl(config.base_url.clone()))?;
        match url.scheme() {
            "https" => {}
            "http" if config.allow_http => {}
            _ => return Err(ScanError::InvalidBaseUrl(config.base_url.clone())),
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| ScanError::ClientBuild)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Analyzes text for prompt-injection content.
    ///
    /// Never returns an error: credential, network, and payload failures all
    /// yield an `Unverified` report.
    #[must_use]
    pub fn analyze(&self, request: &ScanRequest) -> ScanReport {
        self.run_scan(
            &request.text,
            "prompt_injection,long_prompt_injection",
            request.threshold.unwrap_or(DEFAULT_THRESHOLD),
            request.tag.clone(),
        )
    }

    /// Scans a file-access attempt for sensitive-path probing.
    ///
    /// Builds the probe text "Agent attempting to {action} file: {path}" and
    /// maps the result the same way as [`Self::analyze`].
    #[must_use]
    pub fn check_file_access(&self, path: &str, action: &str, threshold: Option<f64>) -> ScanReport {
        let probe = format!("Agent attempting to {action} file: {path}");
        self.run_scan(
            &probe,
            "prompt_injection,sensitive_path_detection",
            threshold.unwrap_or(DEFAULT_THRESHOLD),
            Some("file_access".to_string()),
        )
    }

    /// Sends one scoring request and normalizes the response.
    fn run_scan(
        &self,
        text: &str,
        detections: &str,
        threshold: f64,
        tag: Option<String>,
    ) -> ScanReport {
        let Some(api_token) = self.config.api_token.as_deref() else {
            return ScanReport::unverified("scan api token not configured", threshold, tag);
        };
        let Some(analysis_id) = self.config.analysis_id.as_deref() else {
            return ScanReport::unverified("scan analysis id not configured", threshold, tag);
        };

        let endpoint = format!(
            "{}/v1/analysis/{analysis_id}",
            self.config.base_url.trim_end_matches('/')
        );
        let mut request = self
            .client
            .post(&endpoint)
            .bearer_auth(api_token)
            .query(&[("scan_type", "input"), ("detections", detections)])
            .body(text.to_string());
        if let Some(tag_value) = tag.as_deref() {
            request = request.query(&[("tag", tag_value)]);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(_) => return ScanReport::unverified("scan request failed", threshold, tag),
        };
        if !response.status().is_success() {
            let reason = format!("scan api returned status {}", response.status().as_u16());
            return ScanReport::unverified(reason, threshold, tag);
        }
        let body = match read_response_limited(response, self.config.max_response_bytes) {
            Ok(body) => body,
            Err(reason) => return ScanReport::unverified(reason, threshold, tag),
        };
        normalize_payload(&body, threshold, tag)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body as UTF-8 while enforcing a byte limit.
fn read_response_limited(response: Response, max_bytes: usize) -> Result<String, String> {
    let max_bytes_u64 =
        u64::try_from(max_bytes).map_err(|_| "response size limit exceeds u64".to_string())?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err("scan response exceeds size limit".to_string());
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|_| "failed to read scan response".to_string())?;
    if buf.len() > max_bytes {
        return Err("scan response exceeds size limit".to_string());
    }
    String::from_utf8(buf).map_err(|_| "scan response was not utf-8".to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use super::*;
    use crate::report::ScanVerdict;

    #[test]
    fn rejects_cleartext_base_url_by_default() {
        let config = ScanConfig {
            base_url: "http://localhost:9000".to_string(),
            ..ScanConfig::default()
        };
        assert!(matches!(ScanClient::new(config), Err(ScanError::InvalidBaseUrl(_))));
    }

    #[test]
    fn allows_cleartext_base_url_when_enabled() {
        let config = ScanConfig {
            base_url: "http://localhost:9000".to_string(),
            allow_http: true,
            ..ScanConfig::default()
        };
        assert!(ScanClient::new(config).is_ok());
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ScanConfig {
            base_url: "not a url".to_string(),
            ..ScanConfig::default()
        };
        assert!(matches!(ScanClient::new(config), Err(ScanError::InvalidBaseUrl(_))));
    }

    #[test]
    fn missing_credentials_yield_unverified_without_network() {
        let client = ScanClient::new(ScanConfig::default()).unwrap();
        let report = client.analyze(&ScanRequest {
            text: "hello".to_string(),
            threshold: None,
            tag: Some("t1".to_string()),
        });
        match report.verdict {
            ScanVerdict::Unverified { reason } => {
                assert!(reason.contains("token"), "unexpected reason {reason}");
            }
            other => panic!("expected unverified, got {other:?}"),
        }
        assert_eq!(report.tag, Some("t1".to_string()));
        assert!((report.threshold - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn file_access_check_is_fail_soft() {
        let client = ScanClient::new(ScanConfig::default()).unwrap();
        let report = client.check_file_access("/etc/passwd", "read", None);
        assert!(matches!(report.verdict, ScanVerdict::Unverified { .. }));
        assert_eq!(report.tag, Some("file_access".to_string()));
    }
}
