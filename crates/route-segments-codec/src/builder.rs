//! Path reconstruction from parameters.
//!
//! [`rebuild_with_keys`] edits an existing path in place and keeps every
//! segment it does not manage. [`build_from_template`] renders a fresh path
//! from a route template. The first percent-encodes its output, the second
//! inserts values as they are.

use crate::error::DecodeError;
use crate::params::{KeySet, ParamSource};
use crate::template::{RouteTemplate, TemplateToken};
use crate::tokenizer::{encode_segment, join_absolute, tokenize};

/// Rewrites the managed `key/value` pairs of `original`.
///
/// Each managed key found in the path is replaced, together with the token
/// after it (unless that token is itself a managed key), by `key/value` when
/// `params` holds a value for it, or removed otherwise. Unmanaged segments
/// are copied in place. Keys that never appeared are appended in key order
/// when they have a value. Every output segment is percent-encoded.
///
/// ```
/// use route_segments_codec::{rebuild_with_keys, KeySet, ParamsObject};
///
/// let keys = KeySet::new(["query"]);
/// let params = ParamsObject::from_present([("query", "rtx 4080")]);
/// let path = rebuild_with_keys("/zh-TW/mall/query/rtx%205090/featured", &keys, &params).unwrap();
/// assert_eq!(path, "/zh-TW/mall/query/rtx%204080/featured");
/// ```
///
/// # Errors
///
/// Returns [`DecodeError`] when `original` cannot be tokenized.
pub fn rebuild_with_keys(
	original: &str,
	keys: &KeySet,
	params: &impl ParamSource,
) -> Result<String, DecodeError> {
	let segments = tokenize(original)?;
	let mut output: Vec<String> = Vec::with_capacity(segments.len() + keys.len() * 2);
	let mut seen: Vec<&str> = Vec::new();

	let mut index = 0;
	while index < segments.len() {
		let segment = segments[index].as_str();
		if !keys.contains(segment) {
			output.push(segment.to_string());
			index += 1;
			continue;
		}

		if let Some(value) = params.param(segment) {
			output.push(segment.to_string());
			output.push(value);
		}
		if !seen.contains(&segment) {
			seen.push(segment);
		}

		let follows_value = segments
			.get(index + 1)
			.is_some_and(|next| !keys.contains(next));
		index += if follows_value { 2 } else { 1 };
	}

	for key in keys.iter().filter(|key| !seen.contains(key)) {
		if let Some(value) = params.param(key) {
			output.push(key.to_string());
			output.push(value);
		}
	}

	Ok(join_absolute(output.iter().map(|segment| encode_segment(segment))))
}

impl RouteTemplate {
	/// Renders the template with `params`.
	///
	/// A literal directly followed by a placeholder is a key-name pair: both
	/// are emitted when the placeholder has a value, both are skipped
	/// otherwise. A lone placeholder emits its value or nothing. Values are
	/// not percent-encoded.
	pub fn build(&self, params: &impl ParamSource) -> String {
		let tokens = self.tokens();
		let mut output: Vec<String> = Vec::with_capacity(tokens.len());

		let mut index = 0;
		while index < tokens.len() {
			match (&tokens[index], tokens.get(index + 1)) {
				(TemplateToken::Placeholder(name), _) => {
					if let Some(value) = params.param(name) {
						output.push(value);
					}
					index += 1;
				}
				(TemplateToken::Literal(literal), Some(TemplateToken::Placeholder(name))) => {
					if let Some(value) = params.param(name) {
						output.push(literal.clone());
						output.push(value);
					}
					index += 2;
				}
				(TemplateToken::Literal(literal), _) => {
					output.push(literal.clone());
					index += 1;
				}
			}
		}

		join_absolute(output)
	}
}

/// Renders a template string with `params`.
///
/// See [`RouteTemplate::build`].
///
/// ```
/// use route_segments_codec::{build_from_template, ParamsObject};
///
/// let params = ParamsObject::from_present([("search", "rtx 5090")]);
/// let path = build_from_template("/mall/brand/{brand}/search/{search}", &params);
/// assert_eq!(path, "/mall/search/rtx 5090");
/// ```
pub fn build_from_template(template: &str, params: &impl ParamSource) -> String {
	RouteTemplate::parse(template).build(params)
}
