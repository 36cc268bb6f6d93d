//! Binding configuration.

use serde::{Deserialize, Serialize};

/// Default cap on the length of a parameter value, in characters.
pub const DEFAULT_MAX_PARAM_VALUE_LENGTH: usize = 1000;

/// Default suffix appended to truncated values.
pub const DEFAULT_TRUNCATION_MARKER: &str = "...";

/// Error type for binding configuration
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The TOML source could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A setting failed validation.
	#[error("Invalid configuration: {0}")]
	Invalid(String),
}

/// Settings of a [`ParamsBinding`](crate::ParamsBinding).
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```
/// use route_segments_binding::BindingConfig;
///
/// let config = BindingConfig::from_toml_str("max_param_value_length = 500").unwrap();
/// assert_eq!(config.max_param_value_length, 500);
/// assert_eq!(config.truncation_marker, "...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
	/// Values longer than this many characters are truncated.
	pub max_param_value_length: usize,
	/// Suffix appended to a truncated value.
	pub truncation_marker: String,
}

impl Default for BindingConfig {
	fn default() -> Self {
		Self {
			max_param_value_length: DEFAULT_MAX_PARAM_VALUE_LENGTH,
			truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
		}
	}
}

impl BindingConfig {
	/// Parses and validates a TOML document.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Toml`] for malformed TOML and
	/// [`ConfigError::Invalid`] when validation fails.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Sets the maximum value length.
	pub fn with_max_param_value_length(mut self, max: usize) -> Self {
		self.max_param_value_length = max;
		self
	}

	/// Sets the truncation marker.
	pub fn with_truncation_marker(mut self, marker: impl Into<String>) -> Self {
		self.truncation_marker = marker.into();
		self
	}

	/// Checks that the settings are usable.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Invalid`] when `max_param_value_length` is zero.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_param_value_length == 0 {
			return Err(ConfigError::Invalid(
				"max_param_value_length must be greater than 0".to_string(),
			));
		}
		Ok(())
	}

	/// Truncates `value` to the configured length, appending the marker.
	pub fn truncate(&self, value: &str) -> String {
		match value.char_indices().nth(self.max_param_value_length) {
			Some((cut, _)) => {
				let mut truncated = value[..cut].to_string();
				truncated.push_str(&self.truncation_marker);
				truncated
			}
			None => value.to_string(),
		}
	}
}
