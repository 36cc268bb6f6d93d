//! Pair codec for paths of the form `/base/key/value/key/value`.
//!
//! Everything after the base URL is read as alternating names and values. The
//! base itself is normalized first so that `/products/`, `//products` and
//! `/products` behave the same.

use crate::error::DecodeError;
use crate::filter::to_value_pairs;
use crate::params::{ParamMap, ParamsObject};
use crate::tokenizer::{decode_segment, encode_segment};

/// Normalizes a base URL.
///
/// Repeated slashes collapse to one and a trailing slash is dropped. The root
/// normalizes to the empty string so that it can be concatenated with `/k/v`.
///
/// ```
/// use route_segments_codec::normalize_base_url;
///
/// assert_eq!(normalize_base_url("//products///"), "/products");
/// assert_eq!(normalize_base_url("/"), "");
/// ```
pub fn normalize_base_url(base: &str) -> String {
	let mut normalized = String::with_capacity(base.len());
	for ch in base.chars() {
		if ch == '/' && normalized.ends_with('/') {
			continue;
		}
		normalized.push(ch);
	}
	if normalized.ends_with('/') {
		normalized.pop();
	}
	normalized
}

/// Returns the part of `pathname` after `base`, without its leading slash.
///
/// Returns an empty string when `pathname` does not start with `base` or when
/// nothing follows it.
pub fn relative_path<'a>(pathname: &'a str, base: &str) -> &'a str {
	let Some(rest) = pathname.strip_prefix(base) else {
		return "";
	};
	rest.strip_prefix('/').unwrap_or(rest)
}

/// Reads `name/value` pairs from a relative path.
///
/// Pieces are read two at a time. A pair whose name or value is empty is
/// skipped, as is a trailing name without a value. Values are decoded,
/// names are taken as they are. A later pair overwrites an earlier one with
/// the same name.
///
/// # Errors
///
/// Returns [`DecodeError`] when a value cannot be decoded.
pub fn parse_pairs(relative: &str) -> Result<ParamsObject, DecodeError> {
	let mut params = ParamsObject::new();
	if relative.is_empty() {
		return Ok(params);
	}

	let pieces: Vec<&str> = relative.split('/').collect();
	for pair in pieces.chunks(2) {
		if let [name, value] = pair {
			if !name.is_empty() && !value.is_empty() {
				params.set(*name, decode_segment(value)?);
			}
		}
	}
	Ok(params)
}

/// Parses the parameters encoded after `base` in `pathname`.
///
/// `base` is expected to be normalized with [`normalize_base_url`].
///
/// # Errors
///
/// Returns [`DecodeError`] when a value cannot be decoded.
pub fn parse_url_to_params(pathname: &str, base: &str) -> Result<ParamsObject, DecodeError> {
	parse_pairs(relative_path(pathname, base))
}

/// Builds `base/k1/v1/k2/v2` from the present entries of `params`.
///
/// Values are percent-encoded, names are not. When no entry is present the
/// result is `base` unchanged.
///
/// ```
/// use route_segments_codec::{build_params_to_url, param_map, ParamValue};
///
/// let params = param_map([
/// 	("category", ParamValue::from("electronics")),
/// 	("page", ParamValue::from(2)),
/// ]);
/// assert_eq!(
/// 	build_params_to_url(&params, "/products"),
/// 	"/products/category/electronics/page/2"
/// );
/// ```
pub fn build_params_to_url(params: &ParamMap, base: &str) -> String {
	let pairs = to_value_pairs(params);
	if pairs.is_empty() {
		return base.to_string();
	}

	let mut url = base.to_string();
	for (key, value) in pairs {
		url.push('/');
		url.push_str(&key);
		url.push('/');
		url.push_str(&encode_segment(&value));
	}
	url
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::{ParamValue, param_map};
	use rstest::rstest;

	#[rstest]
	#[case("/products", "/products")]
	#[case("/products/", "/products")]
	#[case("//products///list//", "/products/list")]
	#[case("/", "")]
	#[case("///", "")]
	#[case("", "")]
	fn test_normalize_base_url(#[case] base: &str, #[case] expected: &str) {
		assert_eq!(normalize_base_url(base), expected);
	}

	#[rstest]
	#[case("/products/category/electronics", "/products", "category/electronics")]
	#[case("/products/", "/products", "")]
	#[case("/products", "/products", "")]
	#[case("/search/query/test", "/products", "")]
	#[case("", "/products", "")]
	#[case("/", "/products", "")]
	#[case("/mall/brand/nvidia/search/rtx-5090", "/mall", "brand/nvidia/search/rtx-5090")]
	#[case("/category/books", "", "category/books")]
	fn test_relative_path(#[case] pathname: &str, #[case] base: &str, #[case] expected: &str) {
		assert_eq!(relative_path(pathname, base), expected);
	}

	#[rstest]
	fn test_parse_pairs_decodes_values() {
		// Act
		let params = parse_pairs("category/electronics/query/rtx%205090").unwrap();

		// Assert
		assert_eq!(
			params,
			ParamsObject::from_present([("category", "electronics"), ("query", "rtx 5090")])
		);
	}

	#[rstest]
	#[case("category", vec![])]
	#[case("category/electronics/page", vec![("category", "electronics")])]
	#[case("category//page/2", vec![("page", "2")])]
	#[case("/electronics/page/2", vec![("page", "2")])]
	#[case("", vec![])]
	fn test_parse_pairs_skips_incomplete(#[case] relative: &str, #[case] expected: Vec<(&str, &str)>) {
		assert_eq!(parse_pairs(relative).unwrap(), ParamsObject::from_present(expected));
	}

	#[rstest]
	fn test_parse_pairs_decode_failure() {
		assert!(parse_pairs("query/%").is_err());
	}

	#[rstest]
	fn test_parse_url_to_params() {
		let params = parse_url_to_params("/products/category/books/page/3", "/products").unwrap();
		assert_eq!(params.get("category"), Some("books"));
		assert_eq!(params.get("page"), Some("3"));
	}

	#[rstest]
	fn test_parse_url_to_params_base_mismatch_is_empty() {
		let params = parse_url_to_params("/search/query/test", "/products").unwrap();
		assert!(params.is_empty());
	}

	#[rstest]
	fn test_build_params_to_url_encodes_values() {
		// Arrange
		let params = param_map([
			("query", ParamValue::from("hello/world&test=value")),
			("brand", ParamValue::Absent),
		]);

		// Act
		let url = build_params_to_url(&params, "/search");

		// Assert
		assert_eq!(url, "/search/query/hello%2Fworld%26test%3Dvalue");
	}

	#[rstest]
	fn test_build_params_to_url_no_pairs_is_base() {
		let params = param_map([("brand", ParamValue::from(""))]);
		assert_eq!(build_params_to_url(&params, "/products"), "/products");
		assert_eq!(build_params_to_url(&ParamMap::new(), ""), "");
	}

	#[rstest]
	fn test_build_params_to_url_root_base() {
		let params = param_map([("page", ParamValue::from(1))]);
		assert_eq!(build_params_to_url(&params, &normalize_base_url("/")), "/page/1");
	}
}
