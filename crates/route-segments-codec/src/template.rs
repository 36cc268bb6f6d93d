//! Route templates and placeholder matching.
//!
//! A template is a `/`-delimited list of tokens where a whole segment of the
//! form `{name}` is a placeholder and anything else is a literal:
//!
//! - `/mall/brand/{brand}` - literal `mall`, key-name literal `brand`,
//!   placeholder `brand`
//! - `/{a}/{b}` - two bare placeholders
//!
//! Templates can be matched against a full path ([`match_template`]) or
//! against a positional array that covers only part of the template
//! ([`match_positional_array`]).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::params::ParamsObject;
use crate::tokenizer::{PathInput, split_path, tokenize};

/// Score awarded for each literal that matches at an alignment.
const LITERAL_MATCH_WEIGHT: u32 = 10;

/// Score awarded for each placeholder that binds a non-empty value.
const PLACEHOLDER_BINDING_WEIGHT: u32 = 1;

/// Bonus for a single value aligned to the last template token without any
/// literal match.
const TAIL_ALIGNMENT_BONUS: u32 = 5;

/// One token of a [`RouteTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
	/// A segment matched and emitted verbatim.
	Literal(String),
	/// A `{name}` segment bound to a parameter.
	Placeholder(String),
}

impl TemplateToken {
	fn parse(segment: &str) -> Self {
		match segment
			.strip_prefix('{')
			.and_then(|rest| rest.strip_suffix('}'))
		{
			Some(name) => Self::Placeholder(name.to_string()),
			None => Self::Literal(segment.to_string()),
		}
	}

	/// Returns the placeholder name, if this is a placeholder.
	pub fn placeholder(&self) -> Option<&str> {
		match self {
			Self::Placeholder(name) => Some(name),
			Self::Literal(_) => None,
		}
	}
}

impl fmt::Display for TemplateToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(literal) => f.write_str(literal),
			Self::Placeholder(name) => write!(f, "{{{}}}", name),
		}
	}
}

/// A parsed route template.
///
/// Parsing never fails: empty pieces are dropped and any segment that is not
/// wrapped in braces is a literal. `{}` is a placeholder with an empty name.
/// Placeholder names may repeat, in which case the rightmost bound occurrence
/// wins on match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteTemplate {
	tokens: Vec<TemplateToken>,
}

impl RouteTemplate {
	/// Parses a template string.
	pub fn parse(template: &str) -> Self {
		Self {
			tokens: split_path(template).map(TemplateToken::parse).collect(),
		}
	}

	/// Returns the tokens in order.
	pub fn tokens(&self) -> &[TemplateToken] {
		&self.tokens
	}

	/// Returns the number of tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns whether the template has no tokens.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns placeholder names in order of first appearance.
	pub fn param_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::new();
		for name in self.tokens.iter().filter_map(TemplateToken::placeholder) {
			if !names.contains(&name) {
				names.push(name);
			}
		}
		names
	}

	/// Returns whether the template has no placeholder.
	pub fn is_static(&self) -> bool {
		self.tokens.iter().all(|token| token.placeholder().is_none())
	}

	/// Matches a full path against the template.
	///
	/// Template and path are walked in lock-step. A placeholder binds the
	/// decoded path segment, overwriting an earlier occurrence of the same
	/// name, and a literal must equal it. The walk stops at the
	/// first literal mismatch or when either side runs out, keeping what was
	/// captured so far.
	///
	/// # Errors
	///
	/// Returns [`DecodeError`] when the path cannot be tokenized.
	pub fn match_path(&self, path: &str) -> Result<ParamsObject, DecodeError> {
		let segments = tokenize(path)?;
		let mut params = ParamsObject::new();

		for (token, segment) in self.tokens.iter().zip(&segments) {
			match token {
				TemplateToken::Placeholder(name) => params.set(name.as_str(), segment.as_str()),
				TemplateToken::Literal(literal) => {
					if literal != segment {
						break;
					}
				}
			}
		}

		Ok(params)
	}

	/// Matches a positional array that may cover any contiguous window of the
	/// template.
	///
	/// Every offset at which the values fit inside the template is scored;
	/// a literal mismatch disqualifies the offset. Literal matches weigh 10,
	/// non-empty placeholder bindings weigh 1 per occurrence (a repeated name
	/// keeps its last value), and a single value with no
	/// literal match earns a bonus of 5 when aligned to the last token. The
	/// highest positive score wins, ties going to the earliest offset. When no
	/// offset scores, the result is empty.
	///
	/// # Errors
	///
	/// Returns [`DecodeError`] when any value cannot be decoded.
	pub fn match_positional<S: AsRef<str>>(&self, values: &[S]) -> Result<ParamsObject, DecodeError> {
		let values = tokenize(PathInput::Segments(
			values.iter().map(|value| value.as_ref()).collect(),
		))?;

		let Some(last_offset) = self.tokens.len().checked_sub(values.len()) else {
			return Ok(ParamsObject::new());
		};

		let mut best = ParamsObject::new();
		let mut best_score = 0;
		let mut best_offset = None;

		for offset in 0..=last_offset {
			let Some((candidate, score)) = self.score_alignment(&values, offset) else {
				continue;
			};
			if score > best_score {
				best = candidate;
				best_score = score;
				best_offset = Some(offset);
			}
		}

		tracing::trace!(
			values = values.len(),
			template_len = self.tokens.len(),
			offset = ?best_offset,
			score = best_score,
			"positional alignment resolved"
		);

		Ok(best)
	}

	/// Scores `values` aligned at `offset`, or `None` on a literal mismatch.
	fn score_alignment(&self, values: &[String], offset: usize) -> Option<(ParamsObject, u32)> {
		let mut params = ParamsObject::new();
		let mut literal_matches = 0;
		let mut bindings = 0;

		for (value, token) in values.iter().zip(&self.tokens[offset..]) {
			match token {
				TemplateToken::Placeholder(name) => {
					if !value.is_empty() {
						params.set(name.as_str(), value.as_str());
						bindings += 1;
					}
				}
				TemplateToken::Literal(literal) => {
					if literal != value {
						return None;
					}
					literal_matches += 1;
				}
			}
		}

		let mut score = literal_matches * LITERAL_MATCH_WEIGHT + bindings * PLACEHOLDER_BINDING_WEIGHT;
		if values.len() == 1 && literal_matches == 0 && offset + 1 == self.tokens.len() {
			score += TAIL_ALIGNMENT_BONUS;
		}
		Some((params, score))
	}
}

impl fmt::Display for RouteTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.tokens.is_empty() {
			return f.write_str("/");
		}
		for token in &self.tokens {
			write!(f, "/{}", token)?;
		}
		Ok(())
	}
}

impl FromStr for RouteTemplate {
	type Err = Infallible;

	fn from_str(template: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(template))
	}
}

/// Matches a full path against a template string.
///
/// See [`RouteTemplate::match_path`].
///
/// ```
/// use route_segments_codec::match_template;
///
/// let params = match_template(
/// 	"/mall/brand/nvidia/search/rtx%205090",
/// 	"/mall/brand/{brand}/search/{search}",
/// )
/// .unwrap();
/// assert_eq!(params.get("brand"), Some("nvidia"));
/// assert_eq!(params.get("search"), Some("rtx 5090"));
/// ```
///
/// # Errors
///
/// Returns [`DecodeError`] when the path cannot be tokenized.
pub fn match_template(path: &str, template: &str) -> Result<ParamsObject, DecodeError> {
	RouteTemplate::parse(template).match_path(path)
}

/// Matches a positional array against a template string.
///
/// See [`RouteTemplate::match_positional`].
///
/// ```
/// use route_segments_codec::match_positional_array;
///
/// let template = "/mall/brand/{brand}/search/{search}";
/// let params = match_positional_array(&["search", "rtx 5090"], template).unwrap();
/// assert_eq!(params.get("search"), Some("rtx 5090"));
/// assert_eq!(params.get("brand"), None);
/// ```
///
/// # Errors
///
/// Returns [`DecodeError`] when any value cannot be decoded.
pub fn match_positional_array<S: AsRef<str>>(
	values: &[S],
	template: &str,
) -> Result<ParamsObject, DecodeError> {
	RouteTemplate::parse(template).match_positional(values)
}
