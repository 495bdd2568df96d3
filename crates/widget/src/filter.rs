//! Candidate filtering.
//!
//! A [`Filter`] decides whether a candidate's text matches the current query.
//! The default performs a case-insensitive fuzzy subsequence match.

use std::fmt;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::item::Item;

type FilterFn = dyn Fn(&str, &str) -> bool;

/// Predicate applied as `filter(candidate_text, query)` to every item.
#[derive(Clone)]
pub struct Filter {
	predicate: Rc<FilterFn>,
}

impl Filter {
	/// Wrap a custom predicate. The first argument is the candidate text, the
	/// second is the query typed into the input.
	pub fn new<F>(predicate: F) -> Self
	where
		F: Fn(&str, &str) -> bool + 'static,
	{
		Self {
			predicate: Rc::new(predicate),
		}
	}

	/// Case-insensitive fuzzy subsequence matching.
	#[must_use]
	pub fn fuzzy() -> Self {
		Self::new(fuzzy_match)
	}

	/// Accept candidates that contain the query, ignoring case.
	#[must_use]
	pub fn substring() -> Self {
		Self::new(|candidate, query| {
			candidate
				.to_lowercase()
				.contains(query.to_lowercase().as_str())
		})
	}

	/// Accept candidates that start with the query, ignoring case.
	#[must_use]
	pub fn prefix() -> Self {
		Self::new(|candidate, query| {
			candidate
				.to_lowercase()
				.starts_with(query.to_lowercase().as_str())
		})
	}

	/// Resolve one of the built-in strategies by name.
	pub fn named(name: &str) -> Result<Self, ConfigError> {
		match name.trim().to_ascii_lowercase().as_str() {
			"fuzzy" => Ok(Self::fuzzy()),
			"substring" | "contains" => Ok(Self::substring()),
			"prefix" => Ok(Self::prefix()),
			_ => Err(ConfigError::UnknownFilter {
				name: name.to_string(),
			}),
		}
	}

	/// Evaluate the predicate.
	#[must_use]
	pub fn matches(&self, candidate: &str, query: &str) -> bool {
		(self.predicate)(candidate, query)
	}

	/// Keep the items whose `value` matches `query`, preserving their order.
	#[must_use]
	pub fn apply<'a>(&self, items: &'a [Item], query: &str) -> Vec<&'a Item> {
		items
			.iter()
			.filter(|item| self.matches(&item.value, query))
			.collect()
	}
}

impl Default for Filter {
	fn default() -> Self {
		Self::fuzzy()
	}
}

impl fmt::Debug for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Filter").finish_non_exhaustive()
	}
}

/// Return `true` when every character of `query` appears in `candidate` in
/// order, comparing lowercased text. An empty query matches everything.
#[must_use]
pub fn fuzzy_match(candidate: &str, query: &str) -> bool {
	let candidate = candidate.to_lowercase();
	let query = query.to_lowercase();
	is_subsequence(&query, &candidate)
}

/// Case-sensitive subsequence test of `needle` within `haystack`.
#[must_use]
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
	if needle.len() > haystack.len() {
		return false;
	}

	let mut remaining = haystack.chars();
	needle
		.chars()
		.all(|wanted| remaining.by_ref().any(|ch| ch == wanted))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn items() -> Vec<Item> {
		vec![
			Item::new("hw", "Hello World"),
			Item::new("hr", "Harbour"),
			Item::new("wh", "World Hello"),
			Item::new("zz", "Zebra"),
		]
	}

	#[test]
	fn fuzzy_matches_scattered_characters_ignoring_case() {
		assert!(fuzzy_match("Hello World", "hw"));
		assert!(fuzzy_match("Hello World", "HLOWRD"));
		assert!(!fuzzy_match("Hello World", "xyz"));
		assert!(!fuzzy_match("Hello World", "wh"));
	}

	#[test]
	fn empty_query_matches_everything() {
		assert!(fuzzy_match("anything", ""));
		assert!(fuzzy_match("", ""));
		assert!(!fuzzy_match("", "a"));
	}

	#[test]
	fn longer_query_never_matches_shorter_candidate() {
		assert!(!is_subsequence("abcd", "abc"));
		assert!(is_subsequence("abc", "abc"));
	}

	#[test]
	fn apply_preserves_original_order() {
		let items = items();
		let keys: Vec<&str> = Filter::fuzzy()
			.apply(&items, "h")
			.into_iter()
			.map(|item| item.key.as_str())
			.collect();
		insta::assert_debug_snapshot!(keys, @r#"
		[
		    "hw",
		    "hr",
		    "wh",
		]
		"#);
	}

	#[test]
	fn apply_with_custom_predicate_matches_exactly_the_accepted_set() {
		let items = items();
		let filter = Filter::new(|candidate, query| candidate.len() == query.len());
		let matched: Vec<&Item> = filter.apply(&items, "12345");
		assert_eq!(matched, vec![&items[3]]);
	}

	#[test]
	fn prefix_and_substring_filters() {
		assert!(Filter::prefix().matches("Harbour", "har"));
		assert!(!Filter::prefix().matches("Harbour", "bour"));
		assert!(Filter::substring().matches("Harbour", "BOUR"));
		assert!(!Filter::substring().matches("Harbour", "hb"));
	}

	#[test]
	fn named_filters_resolve_builtins() {
		assert!(Filter::named("Prefix").is_ok_and(|filter| filter.matches("Go", "g")));
		assert!(Filter::named("contains").is_ok_and(|filter| filter.matches("Rust", "us")));
		assert_eq!(
			Filter::named("regex").err(),
			Some(ConfigError::UnknownFilter {
				name: "regex".to_string()
			})
		);
	}
}
