//! Zeroizing string for credentials such as price feed API keys

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that is wiped from memory on drop and never printed
///
/// ```rust
/// use lp_aum_types::SecretString;
///
/// let key = SecretString::new("feed-api-key".to_string());
/// assert_eq!(key.expose_secret(), "feed-api-key");
/// assert_eq!(format!("{}", key), "[REDACTED]");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Expose the secret value, only at the point it goes on the wire
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

// Serialized form is always redacted so reports and dumped settings cannot leak keys
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
		if a.len() != b.len() {
			return false;
		}
		// Constant time over the common length
		a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
	}
}

impl Eq for SecretString {}
