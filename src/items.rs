//! Loading suggestion items for the demo.
//!
//! An items file is either a JSON array (of `{ "key", "value" }` objects,
//! `[key, value]` pairs or plain strings) or line based, where each line is
//! `key<TAB>value` or a bare value that doubles as its key.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autosuggest_widget::Item;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRecord {
    Object { key: String, value: String },
    Pair(String, String),
    Text(String),
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        match record {
            ItemRecord::Object { key, value } | ItemRecord::Pair(key, value) => {
                Item::new(key, value)
            }
            ItemRecord::Text(text) => Item::new(text.clone(), text),
        }
    }
}

/// Read and parse an items file.
pub fn load(path: &Path) -> Result<Vec<Item>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read items file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse items file {}", path.display()))
}

/// Parse items from JSON or line-based text.
pub fn parse(text: &str) -> Result<Vec<Item>> {
    if text.trim_start().starts_with('[') {
        let records: Vec<ItemRecord> =
            serde_json::from_str(text).context("invalid JSON item list")?;
        return Ok(records.into_iter().map(Item::from).collect());
    }

    Ok(text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((key, value)) => Item::new(key.trim(), value.trim()),
            None => Item::new(line.trim(), line.trim()),
        })
        .collect())
}

/// Parse a `KEY=VALUE` command line item. A bare value is used as its own key.
pub fn parse_pair(arg: &str) -> Result<Item, String> {
    let (key, value) = arg.split_once('=').unwrap_or((arg, arg));
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(format!("item '{arg}' has an empty key"));
    }
    Ok(Item::new(key, value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn json_lists_accept_objects_pairs_and_strings() {
        let items = parse(r#"[{"key":"rs","value":"Rust"},["go","Go"],"Zig"]"#).expect("parses");
        assert_eq!(
            items,
            vec![
                Item::new("rs", "Rust"),
                Item::new("go", "Go"),
                Item::new("Zig", "Zig"),
            ]
        );
    }

    #[test]
    fn lines_split_on_tabs_and_skip_blanks() {
        let items = parse("rs\tRust\r\n\nPython\n").expect("parses");
        assert_eq!(
            items,
            vec![Item::new("rs", "Rust"), Item::new("Python", "Python")]
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse("[{\"key\": 1}").is_err());
    }

    #[test]
    fn pairs_require_a_key() {
        assert_eq!(parse_pair("rs=Rust"), Ok(Item::new("rs", "Rust")));
        assert_eq!(parse_pair("Go"), Ok(Item::new("Go", "Go")));
        assert!(parse_pair("=Rust").is_err());
    }

    #[test]
    fn load_reads_files_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "py\tPython").expect("write");
        let items = load(file.path()).expect("loads");
        assert_eq!(items, vec![Item::new("py", "Python")]);

        let missing = file.path().with_extension("missing");
        let err = load(&missing).expect_err("missing file");
        assert!(err.to_string().contains("failed to read items file"));
    }
}
