//! Normalization of loosely typed parameters into string pairs.

use crate::params::ParamMap;

/// Converts a parameter map into ordered `(key, value)` string pairs.
///
/// Absent values and empty strings are dropped. Everything else is
/// stringified through [`ParamValue`](crate::ParamValue)'s `Display`.
///
/// ```
/// use route_segments_codec::{param_map, to_value_pairs, ParamValue};
///
/// let params = param_map([
/// 	("category", ParamValue::from("electronics")),
/// 	("brand", ParamValue::Absent),
/// 	("page", ParamValue::from(2)),
/// ]);
/// assert_eq!(
/// 	to_value_pairs(&params),
/// 	vec![
/// 		("category".to_string(), "electronics".to_string()),
/// 		("page".to_string(), "2".to_string()),
/// 	]
/// );
/// ```
pub fn to_value_pairs(params: &ParamMap) -> Vec<(String, String)> {
	params
		.iter()
		.filter_map(|(key, value)| value.to_present_string().map(|value| (key.clone(), value)))
		.collect()
}
