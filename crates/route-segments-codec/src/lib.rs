//! Bidirectional codec between URL path segments and parameter maps.
//!
//! Navigation state such as filters, dates and search terms is carried in the
//! path itself instead of a query string:
//!
//! - `/mall/brand/nvidia/query/rtx%205090` with managed keys `brand` and
//!   `query` ([`extract_by_keys`], [`rebuild_with_keys`])
//! - `/mall/brand/{brand}/search/{search}` route templates
//!   ([`match_template`], [`match_positional_array`], [`build_from_template`])
//! - `/products/category/electronics/page/2` below a base URL
//!   ([`parse_url_to_params`], [`build_params_to_url`])
//!
//! All functions are pure. Matching never fails for lack of a match; the
//! only error is [`DecodeError`], raised when a segment is not valid
//! percent-encoded UTF-8.
//!
//! ## Example
//!
//! ```
//! use route_segments_codec::{parse_segments, rebuild_with_keys, KeySet};
//!
//! let keys = KeySet::new(["brand", "query"]);
//! let mut params = parse_segments(&keys, "/mall/brand/nvidia/query/rtx%205090").unwrap();
//! params.set("query", "rtx 4080");
//!
//! let path = rebuild_with_keys("/mall/brand/nvidia/query/rtx%205090", &keys, &params).unwrap();
//! assert_eq!(path, "/mall/brand/nvidia/query/rtx%204080");
//! ```

mod builder;
mod error;
mod extract;
mod filter;
mod pairs;
mod params;
mod template;
mod tokenizer;

pub use builder::{build_from_template, rebuild_with_keys};
pub use error::DecodeError;
pub use extract::{extract_by_keys, parse_segments};
pub use filter::to_value_pairs;
pub use pairs::{
	build_params_to_url, normalize_base_url, parse_pairs, parse_url_to_params, relative_path,
};
pub use params::{KeySet, ParamMap, ParamSource, ParamValue, ParamsObject, param_map};
pub use template::{RouteTemplate, TemplateToken, match_positional_array, match_template};
pub use tokenizer::{PathInput, decode_segment, encode_segment, tokenize};
