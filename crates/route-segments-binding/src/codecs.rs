//! Path codecs: how a binding reads its draft from a location and writes it
//! back.

use route_segments_codec::{
	DecodeError, KeySet, ParamMap, ParamValue, ParamsObject, RouteTemplate, build_params_to_url,
	normalize_base_url, parse_segments, parse_url_to_params, rebuild_with_keys,
};

/// Parse/build seam used by [`ParamsBinding`](crate::ParamsBinding).
pub trait PathCodec: Send + Sync {
	/// Reads parameters from a location path.
	fn parse(&self, path: &str) -> Result<ParamsObject, DecodeError>;

	/// Builds the path to navigate to from the current location and draft.
	fn build(&self, current: &str, params: &ParamsObject) -> Result<String, DecodeError>;

	/// Brings a draft into the shape this codec manages.
	///
	/// The default keeps the draft as is.
	fn normalize(&self, params: ParamsObject) -> ParamsObject {
		params
	}
}

/// Managed `key/value` pairs anywhere in the path.
///
/// Unmanaged segments of the current location survive every rebuild.
#[derive(Debug, Clone)]
pub struct KeyListCodec {
	keys: KeySet,
}

impl KeyListCodec {
	/// Creates a codec managing `keys`.
	pub fn new(keys: impl Into<KeySet>) -> Self {
		Self { keys: keys.into() }
	}

	/// Returns the managed keys.
	pub fn keys(&self) -> &KeySet {
		&self.keys
	}
}

impl PathCodec for KeyListCodec {
	fn parse(&self, path: &str) -> Result<ParamsObject, DecodeError> {
		parse_segments(&self.keys, path)
	}

	fn build(&self, current: &str, params: &ParamsObject) -> Result<String, DecodeError> {
		rebuild_with_keys(current, &self.keys, params)
	}

	/// Keeps every declared key, absent ones as `None`, and drops the rest.
	fn normalize(&self, params: ParamsObject) -> ParamsObject {
		self.keys
			.iter()
			.map(|key| (key.to_string(), params.get(key).map(str::to_string)))
			.collect()
	}
}

/// A route template such as `/mall/brand/{brand}/search/{search}`.
///
/// The path is rendered from the template alone; the current location is
/// ignored.
#[derive(Debug, Clone)]
pub struct TemplateCodec {
	template: RouteTemplate,
}

impl TemplateCodec {
	/// Creates a codec rendering through `template`.
	pub fn new(template: &str) -> Self {
		Self {
			template: RouteTemplate::parse(template),
		}
	}

	/// Returns the parsed template.
	pub fn template(&self) -> &RouteTemplate {
		&self.template
	}
}

impl PathCodec for TemplateCodec {
	fn parse(&self, path: &str) -> Result<ParamsObject, DecodeError> {
		self.template.match_path(path)
	}

	fn build(&self, _current: &str, params: &ParamsObject) -> Result<String, DecodeError> {
		Ok(self.template.build(params))
	}
}

/// `name/value` pairs below a base URL, as in `/products/category/books`.
#[derive(Debug, Clone)]
pub struct BaseUrlCodec {
	base: String,
}

impl BaseUrlCodec {
	/// Creates a codec; `base` is normalized.
	pub fn new(base: &str) -> Self {
		Self {
			base: normalize_base_url(base),
		}
	}

	/// Returns the normalized base URL.
	pub fn base(&self) -> &str {
		&self.base
	}
}

impl PathCodec for BaseUrlCodec {
	fn parse(&self, path: &str) -> Result<ParamsObject, DecodeError> {
		parse_url_to_params(path, &self.base)
	}

	fn build(&self, _current: &str, params: &ParamsObject) -> Result<String, DecodeError> {
		let params: ParamMap = params
			.iter()
			.map(|(key, value)| (key.to_string(), ParamValue::from(value)))
			.collect();
		let url = build_params_to_url(&params, &self.base);
		// the root base normalizes to ""
		Ok(if url.is_empty() { "/".to_string() } else { url })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_key_list_normalize_keeps_declared_keys() {
		// Arrange
		let codec = KeyListCodec::new(["brand", "query"]);
		let draft = ParamsObject::from_present([("query", "gpu"), ("sort", "price")]);

		// Act
		let normalized = codec.normalize(draft);

		// Assert
		assert_eq!(normalized.keys().collect::<Vec<_>>(), vec!["brand", "query"]);
		assert_eq!(normalized.get("brand"), None);
		assert_eq!(normalized.get("query"), Some("gpu"));
		assert!(!normalized.contains_key("sort"));
	}

	#[rstest]
	fn test_key_list_round_trip() {
		let codec = KeyListCodec::new(["query"]);
		let params = ParamsObject::from_present([("query", "rtx 4080")]);
		let path = codec.build("/mall/query/rtx%205090/sale", &params).unwrap();
		assert_eq!(path, "/mall/query/rtx%204080/sale");
		assert_eq!(codec.parse(&path).unwrap(), params);
	}

	#[rstest]
	fn test_template_codec_ignores_current_location() {
		let codec = TemplateCodec::new("/mall/brand/{brand}/search/{search}");
		let params = ParamsObject::from_present([("search", "rtx 5090")]);
		assert_eq!(codec.build("/elsewhere", &params).unwrap(), "/mall/search/rtx 5090");
		assert_eq!(codec.template().param_names(), vec!["brand", "search"]);
	}

	#[rstest]
	fn test_template_codec_parse() {
		let codec = TemplateCodec::new("/mall/brand/{brand}");
		let params = codec.parse("/mall/brand/nvidia").unwrap();
		assert_eq!(params.get("brand"), Some("nvidia"));
	}

	#[rstest]
	fn test_base_url_codec_normalizes_base() {
		let codec = BaseUrlCodec::new("//products/");
		assert_eq!(codec.base(), "/products");
	}

	#[rstest]
	#[case("/products", "/products")]
	#[case("/", "/")]
	fn test_base_url_codec_empty_draft(#[case] base: &str, #[case] expected: &str) {
		let codec = BaseUrlCodec::new(base);
		assert_eq!(codec.build(base, &ParamsObject::new()).unwrap(), expected);
	}

	#[rstest]
	fn test_base_url_codec_round_trip() {
		// Arrange
		let codec = BaseUrlCodec::new("/products");
		let params = ParamsObject::from_present([("category", "home & garden"), ("page", "2")]);

		// Act
		let path = codec.build("/products", &params).unwrap();

		// Assert
		assert_eq!(path, "/products/category/home%20%26%20garden/page/2");
		assert_eq!(codec.parse(&path).unwrap(), params);
	}
}
