use serde::{Deserialize, Serialize};

/// A single suggestion candidate supplied by the caller.
///
/// `key` identifies the item when it is selected, `value` is the text that is
/// displayed and matched against the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
	/// Unique identifier reported back through `on_select`.
	pub key: String,
	/// Visible text.
	pub value: String,
}

impl Item {
	/// Build an item from its key and display text.
	#[must_use]
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

impl<K, V> From<(K, V)> for Item
where
	K: Into<String>,
	V: Into<String>,
{
	fn from((key, value): (K, V)) -> Self {
		Self::new(key, value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn items_deserialize_from_json_objects() {
		let items: Vec<Item> =
			serde_json::from_str(r#"[{"key":"rs","value":"Rust"},{"key":"go","value":"Go"}]"#)
				.expect("valid json");
		assert_eq!(items, vec![Item::new("rs", "Rust"), Item::from(("go", "Go"))]);
	}
}
