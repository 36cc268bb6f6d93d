//! Key-ordered extraction of `key/value` pairs from a segment sequence.

use crate::error::DecodeError;
use crate::params::{KeySet, ParamsObject};
use crate::tokenizer::{PathInput, tokenize};

/// Extracts the value that follows each managed key.
///
/// For every key, in key order, the first segment equal to the key is
/// located; the value is the segment right after it, or `None` if the key is
/// last or missing. Comparison is exact. A key directly followed by another
/// key takes that key token as its value.
///
/// Every key in `keys` appears in the result.
///
/// ```
/// use route_segments_codec::{extract_by_keys, KeySet};
///
/// let keys = KeySet::new(["brand", "query"]);
/// let segments = vec!["mall".to_string(), "brand".to_string(), "nvidia".to_string()];
/// let params = extract_by_keys(&keys, &segments);
/// assert_eq!(params.get("brand"), Some("nvidia"));
/// assert!(params.contains_key("query"));
/// assert_eq!(params.get("query"), None);
/// ```
pub fn extract_by_keys(keys: &KeySet, segments: &[String]) -> ParamsObject {
	keys.iter()
		.map(|key| {
			let value = segments
				.iter()
				.position(|segment| segment == key)
				.and_then(|index| segments.get(index + 1))
				.cloned();
			(key.to_string(), value)
		})
		.collect()
}

/// Tokenizes `input` and extracts the managed keys from it.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input cannot be tokenized.
pub fn parse_segments<'a>(
	keys: &KeySet,
	input: impl Into<PathInput<'a>>,
) -> Result<ParamsObject, DecodeError> {
	let segments = tokenize(input)?;
	Ok(extract_by_keys(keys, &segments))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn segments(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| s.to_string()).collect()
	}

	#[rstest]
	fn test_extract_first_occurrence_wins() {
		// Arrange
		let keys = KeySet::new(["brand"]);
		let segments = segments(&["brand", "amd", "brand", "nvidia"]);

		// Act
		let params = extract_by_keys(&keys, &segments);

		// Assert
		assert_eq!(params.get("brand"), Some("amd"));
	}

	#[rstest]
	fn test_extract_adjacent_key_is_value() {
		let keys = KeySet::new(["brand", "query"]);
		let params = extract_by_keys(&keys, &segments(&["brand", "query", "rtx"]));
		assert_eq!(params.get("brand"), Some("query"));
		assert_eq!(params.get("query"), Some("rtx"));
	}

	#[rstest]
	fn test_extract_trailing_key_is_absent() {
		let keys = KeySet::new(["brand"]);
		let params = extract_by_keys(&keys, &segments(&["mall", "brand"]));
		assert!(params.contains_key("brand"));
		assert_eq!(params.get("brand"), None);
	}

	#[rstest]
	fn test_extract_empty_segments_all_absent() {
		let keys = KeySet::new(["a", "b"]);
		let params = extract_by_keys(&keys, &[]);
		assert_eq!(params.len(), 2);
		assert!(params.iter().all(|(_, value)| value.is_none()));
	}

	#[rstest]
	fn test_extract_empty_keys_empty_map() {
		let params = extract_by_keys(&KeySet::default(), &segments(&["a", "b"]));
		assert!(params.is_empty());
	}

	#[rstest]
	fn test_extract_is_case_sensitive() {
		let keys = KeySet::new(["brand"]);
		let params = extract_by_keys(&keys, &segments(&["Brand", "amd"]));
		assert_eq!(params.get("brand"), None);
	}

	#[rstest]
	fn test_extract_keeps_empty_value_in_segment_mode() {
		// Arrange
		let keys = KeySet::new(["query"]);

		// Act
		let params = parse_segments(&keys, &["query", ""]).unwrap();

		// Assert
		assert_eq!(params.get("query"), Some(""));
	}

	#[rstest]
	#[case("/zh-TW/mall/brand/nvidia/query/rtx%205090", Some("nvidia"), Some("rtx 5090"))]
	#[case("/mall/query/gpu", None, Some("gpu"))]
	#[case("/", None, None)]
	fn test_parse_segments_from_path(
		#[case] path: &str,
		#[case] brand: Option<&str>,
		#[case] query: Option<&str>,
	) {
		let keys = KeySet::new(["brand", "query"]);
		let params = parse_segments(&keys, path).unwrap();
		assert_eq!(params.get("brand"), brand);
		assert_eq!(params.get("query"), query);
	}

	#[rstest]
	fn test_parse_segments_propagates_decode_error() {
		let keys = KeySet::new(["query"]);
		assert!(parse_segments(&keys, "/query/%").is_err());
	}
}
