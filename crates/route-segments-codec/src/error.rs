//! Error types for the segment codec.

/// Error raised when a path segment cannot be percent-decoded.
///
/// Matching and building never fail for lack of a match; a partial or empty
/// [`ParamsObject`](crate::ParamsObject) is returned instead. Decoding is the
/// only hard failure, and callers at the navigation boundary are expected to
/// treat the whole path as unparseable when it occurs.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
	/// A `%` that is not followed by two hexadecimal digits.
	#[error("malformed percent-encoding at byte {position} of segment '{segment}'")]
	MalformedEscape {
		/// The raw segment as it appeared in the path.
		segment: String,
		/// Byte offset of the offending `%`.
		position: usize,
	},

	/// Escapes were well-formed but the decoded bytes are not UTF-8.
	#[error("segment '{segment}' does not decode to valid UTF-8")]
	InvalidUtf8 {
		/// The raw segment as it appeared in the path.
		segment: String,
	},
}

impl DecodeError {
	/// Returns the raw segment that failed to decode.
	pub fn segment(&self) -> &str {
		match self {
			Self::MalformedEscape { segment, .. } | Self::InvalidUtf8 { segment } => segment,
		}
	}
}
