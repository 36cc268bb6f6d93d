//! Parameter containers.
//!
//! The read side of the codec produces [`ParamsObject`]s, where a key maps to
//! a decoded string or to absence. The write side accepts anything that
//! implements [`ParamSource`], which folds `None`, missing keys and empty
//! strings into a single "omit" state.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map from parameter name to an optional value.
///
/// `None` means the parameter is absent; it is distinct from `Some("")`,
/// which is a legitimately extracted empty segment.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamsObject {
	entries: IndexMap<String, Option<String>>,
}

impl ParamsObject {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a map in which every entry is present.
	pub fn from_present<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		entries
			.into_iter()
			.map(|(key, value)| (key.into(), Some(value.into())))
			.collect()
	}

	/// Returns the value of `key`, or `None` if it is absent or unknown.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).and_then(|value| value.as_deref())
	}

	/// Returns whether `key` has an entry, even an absent one.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Inserts an entry, returning the previous value of that key.
	pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> Option<Option<String>> {
		self.entries.insert(key.into(), value)
	}

	/// Inserts a present value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.insert(key.into(), Some(value.into()));
	}

	/// Removes an entry while keeping the order of the remaining ones.
	pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
		self.entries.shift_remove(key)
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_deref()))
	}

	/// Iterates keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Returns the number of entries, absent ones included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns a copy keeping only entries that hold a non-empty value.
	pub fn present(&self) -> Self {
		self.entries
			.iter()
			.filter(|(_, value)| value.as_deref().is_some_and(|v| !v.is_empty()))
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}
}

impl FromIterator<(String, Option<String>)> for ParamsObject {
	fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for ParamsObject {
	fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
		iter.into_iter()
			.map(|(key, value)| (key.to_string(), value.map(str::to_string)))
			.collect()
	}
}

impl IntoIterator for ParamsObject {
	type Item = (String, Option<String>);
	type IntoIter = indexmap::map::IntoIter<String, Option<String>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

/// A loosely typed value on the write side of the codec.
///
/// Hosts often hold filter state as numbers or booleans; every variant has a
/// deterministic string form (see [`fmt::Display`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// No value.
	#[default]
	Absent,
	/// A boolean, rendered as `true` or `false`.
	Bool(bool),
	/// An integer, rendered in decimal.
	Int(i64),
	/// A float, rendered in shortest round-trip form.
	Float(f64),
	/// A string, rendered as is.
	Str(String),
}

impl ParamValue {
	/// Returns whether the value is omitted when written: absent or `""`.
	pub fn is_absent(&self) -> bool {
		match self {
			Self::Absent => true,
			Self::Str(value) => value.is_empty(),
			_ => false,
		}
	}

	/// Returns the string form, or `None` when the value is omitted.
	pub fn to_present_string(&self) -> Option<String> {
		if self.is_absent() {
			None
		} else {
			Some(self.to_string())
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absent => Ok(()),
			Self::Bool(value) => write!(f, "{}", value),
			Self::Int(value) => write!(f, "{}", value),
			Self::Float(value) if value.is_nan() => f.write_str("NaN"),
			Self::Float(value) if value.is_infinite() => {
				f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
			}
			// -0.0 renders as 0
			Self::Float(value) if *value == 0.0 => f.write_str("0"),
			Self::Float(value) => write!(f, "{}", value),
			Self::Str(value) => f.write_str(value),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Absent, Into::into)
	}
}

/// An insertion-ordered map of loosely typed values.
pub type ParamMap = IndexMap<String, ParamValue>;

/// Builds a [`ParamMap`] from `(key, value)` pairs.
///
/// ```
/// use route_segments_codec::{param_map, ParamValue};
///
/// let params = param_map([("page", ParamValue::from(2)), ("q", "gpu".into())]);
/// assert_eq!(params.len(), 2);
/// ```
pub fn param_map<I, K>(entries: I) -> ParamMap
where
	I: IntoIterator<Item = (K, ParamValue)>,
	K: Into<String>,
{
	entries
		.into_iter()
		.map(|(key, value)| (key.into(), value))
		.collect()
}

/// Read access used by every builder.
///
/// Implementations return `Some` only for present, non-empty values, so
/// builders never have to distinguish `None`, a missing key and `""`.
pub trait ParamSource {
	/// Returns the string to write for `name`, or `None` to omit it.
	fn param(&self, name: &str) -> Option<String>;
}

impl ParamSource for ParamsObject {
	fn param(&self, name: &str) -> Option<String> {
		self.get(name)
			.filter(|value| !value.is_empty())
			.map(str::to_string)
	}
}

impl ParamSource for ParamMap {
	fn param(&self, name: &str) -> Option<String> {
		self.get(name).and_then(ParamValue::to_present_string)
	}
}

impl ParamSource for HashMap<String, String> {
	fn param(&self, name: &str) -> Option<String> {
		self.get(name).filter(|value| !value.is_empty()).cloned()
	}
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
	fn param(&self, name: &str) -> Option<String> {
		(**self).param(name)
	}
}

/// An ordered, deduplicated list of managed parameter names.
///
/// Duplicates collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeySet {
	keys: Vec<String>,
}

impl KeySet {
	/// Creates a key set, dropping repeated names.
	pub fn new<I, S>(keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut deduped: Vec<String> = Vec::new();
		for key in keys {
			let key = key.into();
			if !deduped.contains(&key) {
				deduped.push(key);
			}
		}
		Self { keys: deduped }
	}

	/// Returns whether `name` is a managed key.
	pub fn contains(&self, name: &str) -> bool {
		self.keys.iter().any(|key| key == name)
	}

	/// Iterates keys in declared order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Returns whether no key is managed.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

impl From<Vec<String>> for KeySet {
	fn from(keys: Vec<String>) -> Self {
		Self::new(keys)
	}
}

impl From<KeySet> for Vec<String> {
	fn from(keys: KeySet) -> Self {
		keys.keys
	}
}

impl<'a> From<&'a [&'a str]> for KeySet {
	fn from(keys: &'a [&'a str]) -> Self {
		Self::new(keys.iter().copied())
	}
}

impl<const N: usize> From<[&str; N]> for KeySet {
	fn from(keys: [&str; N]) -> Self {
		Self::new(keys)
	}
}

impl<S: Into<String>> FromIterator<S> for KeySet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self::new(iter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_params_object_absent_is_not_empty_string() {
		// Arrange
		let mut params = ParamsObject::new();
		params.insert("brand", None);
		params.set("query", "");

		// Assert
		assert!(params.contains_key("brand"));
		assert_eq!(params.get("brand"), None);
		assert_eq!(params.get("query"), Some(""));
		assert_eq!(params.len(), 2);
	}

	#[rstest]
	fn test_params_object_equality_ignores_order() {
		let a = ParamsObject::from_present([("a", "1"), ("b", "2")]);
		let b = ParamsObject::from_present([("b", "2"), ("a", "1")]);
		assert_eq!(a, b);
	}

	#[rstest]
	fn test_params_object_remove_keeps_order() {
		let mut params = ParamsObject::from_present([("a", "1"), ("b", "2"), ("c", "3")]);
		params.remove("b");
		assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "c"]);
	}

	#[rstest]
	fn test_params_object_present_drops_absent_and_empty() {
		let params: ParamsObject = [("a", Some("1")), ("b", None), ("c", Some(""))]
			.into_iter()
			.collect();
		assert_eq!(params.present(), ParamsObject::from_present([("a", "1")]));
	}

	#[rstest]
	fn test_params_object_serializes_as_map() {
		let params: ParamsObject = [("brand", Some("amd")), ("query", None)].into_iter().collect();
		let json = serde_json::to_string(&params).unwrap();
		assert_eq!(json, r#"{"brand":"amd","query":null}"#);
	}

	#[rstest]
	#[case(ParamValue::Bool(true), "true")]
	#[case(ParamValue::Bool(false), "false")]
	#[case(ParamValue::Int(0), "0")]
	#[case(ParamValue::Int(-42), "-42")]
	#[case(ParamValue::Float(1.0), "1")]
	#[case(ParamValue::Float(1.5), "1.5")]
	#[case(ParamValue::Float(-0.0), "0")]
	#[case(ParamValue::Float(f64::NAN), "NaN")]
	#[case(ParamValue::Float(f64::INFINITY), "Infinity")]
	#[case(ParamValue::Float(f64::NEG_INFINITY), "-Infinity")]
	#[case(ParamValue::Str("rtx 5090".to_string()), "rtx 5090")]
	fn test_param_value_display(#[case] value: ParamValue, #[case] expected: &str) {
		assert_eq!(value.to_string(), expected);
	}

	#[rstest]
	#[case(ParamValue::Absent, true)]
	#[case(ParamValue::Str(String::new()), true)]
	#[case(ParamValue::Str(" ".to_string()), false)]
	#[case(ParamValue::Int(0), false)]
	#[case(ParamValue::Bool(false), false)]
	fn test_param_value_is_absent(#[case] value: ParamValue, #[case] expected: bool) {
		assert_eq!(value.is_absent(), expected);
	}

	#[rstest]
	fn test_param_value_from_option() {
		assert_eq!(ParamValue::from(None::<&str>), ParamValue::Absent);
		assert_eq!(ParamValue::from(Some(3)), ParamValue::Int(3));
	}

	#[rstest]
	fn test_param_value_deserializes_untagged() {
		let params: ParamMap =
			serde_json::from_str(r#"{"a":null,"b":true,"c":2,"d":2.5,"e":"x"}"#).unwrap();
		assert_eq!(params["a"], ParamValue::Absent);
		assert_eq!(params["b"], ParamValue::Bool(true));
		assert_eq!(params["c"], ParamValue::Int(2));
		assert_eq!(params["d"], ParamValue::Float(2.5));
		assert_eq!(params["e"], ParamValue::Str("x".to_string()));
	}

	#[rstest]
	fn test_param_source_folds_absence() {
		// Arrange
		let object: ParamsObject = [("a", None), ("b", Some("")), ("c", Some("x"))]
			.into_iter()
			.collect();
		let map = param_map([("a", ParamValue::Absent), ("b", "".into()), ("c", "x".into())]);

		// Assert
		for source in [&object as &dyn ParamSource, &map as &dyn ParamSource] {
			assert_eq!(source.param("a"), None);
			assert_eq!(source.param("b"), None);
			assert_eq!(source.param("c"), Some("x".to_string()));
			assert_eq!(source.param("missing"), None);
		}
	}

	#[rstest]
	fn test_key_set_dedupes_first_occurrence() {
		let keys = KeySet::new(["query", "brand", "query", "page", "brand"]);
		assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["query", "brand", "page"]);
		assert_eq!(keys.len(), 3);
		assert!(keys.contains("page"));
		assert!(!keys.contains("sort"));
	}

	#[rstest]
	fn test_key_set_deserializes_with_dedup() {
		let keys: KeySet = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
		assert_eq!(keys, KeySet::from(["a", "b"]));
	}
}
