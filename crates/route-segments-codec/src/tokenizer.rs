//! Path tokenization.
//!
//! Turns a path string (`/mall/brand/nvidia`) or a pre-split list of raw
//! segments into an ordered sequence of decoded segments.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::DecodeError;

/// Characters left untouched when a segment is encoded.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )` is escaped,
/// so an encoded segment never contains `/`, `%` (other than escapes) or
/// whitespace.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Input accepted by [`tokenize`].
///
/// Hosts that hand over a full location use [`PathInput::Path`]; hosts whose
/// router already split a catch-all route into raw segments use
/// [`PathInput::Segments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput<'a> {
	/// A `/`-delimited path.
	Path(&'a str),
	/// Raw segments, already split.
	Segments(Vec<&'a str>),
}

impl<'a> From<&'a str> for PathInput<'a> {
	fn from(path: &'a str) -> Self {
		Self::Path(path)
	}
}

impl<'a> From<&'a String> for PathInput<'a> {
	fn from(path: &'a String) -> Self {
		Self::Path(path.as_str())
	}
}

impl<'a> From<&'a [String]> for PathInput<'a> {
	fn from(segments: &'a [String]) -> Self {
		Self::Segments(segments.iter().map(String::as_str).collect())
	}
}

impl<'a> From<&'a Vec<String>> for PathInput<'a> {
	fn from(segments: &'a Vec<String>) -> Self {
		Self::from(segments.as_slice())
	}
}

impl<'a, 'b: 'a> From<&'a [&'b str]> for PathInput<'a> {
	fn from(segments: &'a [&'b str]) -> Self {
		Self::Segments(segments.to_vec())
	}
}

impl<'a, 'b: 'a, const N: usize> From<&'a [&'b str; N]> for PathInput<'a> {
	fn from(segments: &'a [&'b str; N]) -> Self {
		Self::Segments(segments.to_vec())
	}
}

/// Splits a path into its non-empty raw pieces.
///
/// Leading, trailing and repeated slashes are absorbed.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
	path.split('/').filter(|piece| !piece.is_empty())
}

/// Tokenizes a path or a list of raw segments into decoded segments.
///
/// In path mode the input is split on `/` and empty pieces are dropped. In
/// segment mode every element is decoded independently and kept at its
/// position, empty elements included.
///
/// # Errors
///
/// Returns [`DecodeError`] if any segment contains a malformed percent escape
/// or decodes to invalid UTF-8. There is no partial result.
///
/// # Examples
///
/// ```
/// use route_segments_codec::tokenize;
///
/// let segments = tokenize("//brand///rtx%205090/").unwrap();
/// assert_eq!(segments, vec!["brand", "rtx 5090"]);
///
/// let segments = tokenize(&["query", "%E5%88%A9%E7%8E%87"]).unwrap();
/// assert_eq!(segments, vec!["query", "利率"]);
/// ```
pub fn tokenize<'a>(input: impl Into<PathInput<'a>>) -> Result<Vec<String>, DecodeError> {
	match input.into() {
		PathInput::Path(path) => split_path(path).map(decode_segment).collect(),
		PathInput::Segments(segments) => segments.into_iter().map(decode_segment).collect(),
	}
}

/// Percent-decodes a single raw segment.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEscape`] when a `%` is not followed by two
/// hex digits and [`DecodeError::InvalidUtf8`] when the decoded bytes are not
/// UTF-8.
pub fn decode_segment(raw: &str) -> Result<String, DecodeError> {
	let bytes = raw.as_bytes();
	let mut index = 0;
	while index < bytes.len() {
		if bytes[index] == b'%' {
			let well_formed = bytes.len() > index + 2
				&& bytes[index + 1].is_ascii_hexdigit()
				&& bytes[index + 2].is_ascii_hexdigit();
			if !well_formed {
				return Err(DecodeError::MalformedEscape {
					segment: raw.to_string(),
					position: index,
				});
			}
			index += 3;
		} else {
			index += 1;
		}
	}

	percent_decode_str(raw)
		.decode_utf8()
		.map(|decoded| decoded.into_owned())
		.map_err(|_| DecodeError::InvalidUtf8 {
			segment: raw.to_string(),
		})
}

/// Percent-encodes a value so that it is safe to use as one path segment.
pub fn encode_segment(value: &str) -> String {
	utf8_percent_encode(value, SEGMENT).to_string()
}

/// Joins already-encoded segments into an absolute path.
///
/// No segments yields `/`.
pub(crate) fn join_absolute<I, S>(segments: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut path = String::new();
	for segment in segments {
		path.push('/');
		path.push_str(segment.as_ref());
	}
	if path.is_empty() {
		path.push('/');
	}
	path
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/zh-TW/mall/brand/nvidia", vec!["zh-TW", "mall", "brand", "nvidia"])]
	#[case("/brand/nvidia/query/rtx%205090", vec!["brand", "nvidia", "query", "rtx 5090"])]
	#[case("//brand///nvidia//", vec!["brand", "nvidia"])]
	#[case("brand/nvidia", vec!["brand", "nvidia"])]
	#[case("/", vec![])]
	#[case("", vec![])]
	fn test_tokenize_path(#[case] path: &str, #[case] expected: Vec<&str>) {
		// Act
		let segments = tokenize(path).unwrap();

		// Assert
		assert_eq!(segments, expected);
	}

	#[rstest]
	fn test_tokenize_decodes_unicode() {
		// Act
		let segments = tokenize("/query/%E5%88%A9%E7%8E%87%E6%B1%BA%E8%AD%B0").unwrap();

		// Assert
		assert_eq!(segments, vec!["query", "利率決議"]);
	}

	#[rstest]
	fn test_tokenize_keeps_encoded_slash_inside_segment() {
		let segments = tokenize("/path/a%2Fb").unwrap();
		assert_eq!(segments, vec!["path", "a/b"]);
	}

	#[rstest]
	#[case("/query/%")]
	#[case("/query/%2")]
	#[case("/query/%zz")]
	#[case("/ok/50%/more")]
	fn test_tokenize_rejects_malformed_escape(#[case] path: &str) {
		// Act
		let result = tokenize(path);

		// Assert
		assert!(matches!(
			result,
			Err(DecodeError::MalformedEscape { .. })
		));
	}

	#[rstest]
	fn test_tokenize_reports_escape_position() {
		let err = tokenize("/query/ab%").unwrap_err();
		assert_eq!(
			err,
			DecodeError::MalformedEscape {
				segment: "ab%".to_string(),
				position: 2,
			}
		);
	}

	#[rstest]
	fn test_tokenize_rejects_invalid_utf8() {
		let result = tokenize("/query/%FF%FE");
		assert!(matches!(result, Err(DecodeError::InvalidUtf8 { .. })));
	}

	#[rstest]
	fn test_tokenize_segments_mode_keeps_positions() {
		// Arrange
		let raw = vec!["brand".to_string(), String::new(), "rtx%205090".to_string()];

		// Act
		let segments = tokenize(&raw).unwrap();

		// Assert
		assert_eq!(segments, vec!["brand", "", "rtx 5090"]);
	}

	#[rstest]
	fn test_tokenize_segments_mode_does_not_split() {
		let segments = tokenize(&["a/b", "c"]).unwrap();
		assert_eq!(segments, vec!["a/b", "c"]);
	}

	#[rstest]
	fn test_tokenize_segments_mode_rejects_malformed() {
		assert!(tokenize(&["query", "%"]).is_err());
	}

	#[rstest]
	#[case("rtx 5090", "rtx%205090")]
	#[case("a/b/c", "a%2Fb%2Fc")]
	#[case("50%", "50%25")]
	#[case("中文", "%E4%B8%AD%E6%96%87")]
	#[case("zh-TW", "zh-TW")]
	#[case("it's(ok)!~*._", "it's(ok)!~*._")]
	#[case("hello/world&test=value", "hello%2Fworld%26test%3Dvalue")]
	fn test_encode_segment(#[case] value: &str, #[case] expected: &str) {
		assert_eq!(encode_segment(value), expected);
	}

	#[rstest]
	fn test_join_absolute() {
		assert_eq!(join_absolute(["a", "b"]), "/a/b");
		assert_eq!(join_absolute(Vec::<String>::new()), "/");
	}
}
