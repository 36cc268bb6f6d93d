//! # Route Segments
//!
//! Shareable navigation state carried in the URL path instead of a query
//! string.
//!
//! This crate is a unified interface over the following internal crates:
//!
//! - `route-segments-codec`: tokenizer, key-ordered extraction, template
//!   matching, path rebuilding and the base-URL pair codec
//! - `route-segments-binding`: a parameter draft kept in sync with a
//!   navigator through an explicit update queue
//!
//! ## Feature Flags
//!
//! - `binding` (default) - URL-synchronized state on top of the codec
//!
//! ## Quick Example
//!
//! ```
//! use route_segments::prelude::*;
//!
//! let keys = KeySet::new(["brand", "query"]);
//! let params = parse_segments(&keys, "/zh-TW/mall/brand/nvidia/query/rtx%205090").unwrap();
//! assert_eq!(params.get("query"), Some("rtx 5090"));
//!
//! let template = "/mall/brand/{brand}/search/{search}";
//! let params = match_positional_array(&["rtx 5090"], template).unwrap();
//! assert_eq!(build_from_template(template, &params), "/mall/search/rtx 5090");
//! ```

pub use route_segments_codec as codec;

#[cfg(feature = "binding")]
pub use route_segments_binding as binding;

pub use route_segments_codec::{DecodeError, KeySet, ParamMap, ParamValue, ParamsObject};

/// Commonly used items.
pub mod prelude {
	pub use route_segments_codec::{
		DecodeError, KeySet, ParamMap, ParamSource, ParamValue, ParamsObject, RouteTemplate,
		build_from_template, build_params_to_url, extract_by_keys, match_positional_array,
		match_template, normalize_base_url, param_map, parse_segments, parse_url_to_params,
		rebuild_with_keys, tokenize, to_value_pairs,
	};

	#[cfg(feature = "binding")]
	pub use route_segments_binding::{
		BaseUrlCodec, BindingConfig, KeyListCodec, MemoryNavigator, NavigationMode, Navigator,
		ParamsBinding, ParamsUpdate, PathCodec, TemplateCodec, UpdateQueue,
	};
}
