//! Error types for snapshot readers and price sources

use thiserror::Error;

/// Collaborator (I/O) errors
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Unsupported reader: {0}")]
	UnsupportedReader(String),

	#[error("Reader already registered: {0}")]
	DuplicateReader(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Whether another attempt could plausibly succeed
	pub fn is_transient(&self) -> bool {
		match self {
			AdapterError::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
			AdapterError::HttpStatusError { status_code, .. } => {
				*status_code == 408 || *status_code == 429 || *status_code >= 500
			},
			AdapterError::Timeout { .. } => true,
			_ => false,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_extraction() {
		let error = AdapterError::from_http_failure(503);
		assert_eq!(error.status_code(), Some(503));
		assert!(error.to_string().contains("Service Unavailable"));

		let error = AdapterError::InvalidResponse {
			reason: "missing assets".to_string(),
		};
		assert_eq!(error.status_code(), None);
	}

	#[test]
	fn test_transient_classification() {
		assert!(AdapterError::from_http_failure(502).is_transient());
		assert!(AdapterError::from_http_failure(429).is_transient());
		assert!(AdapterError::Timeout { timeout_ms: 10 }.is_transient());
		assert!(!AdapterError::from_http_failure(404).is_transient());
		assert!(!AdapterError::UnsupportedReader("rpc".to_string()).is_transient());
	}
}
