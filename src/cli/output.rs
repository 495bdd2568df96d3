use anyhow::Result;
use serde_json::json;

use crate::runtime::Outcome;

/// Print a plain-text representation of the outcome.
pub(crate) fn print_plain(outcome: &Outcome) {
    if !outcome.accepted {
        println!("Selection cancelled (query: '{}')", outcome.query);
        return;
    }

    match &outcome.selection {
        Some(item) => println!("{}", item.key),
        None => println!("No selection"),
    }
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
    let selection = match &outcome.selection {
        Some(item) => json!({
            "key": item.key,
            "value": item.value,
        }),
        None => serde_json::Value::Null,
    };

    let payload = json!({
        "accepted": outcome.accepted,
        "query": outcome.query,
        "selection": selection,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use autosuggest_widget::Item;
    use serde_json::Value;

    use super::*;

    #[test]
    fn json_format_includes_selected_item() {
        let outcome = Outcome {
            accepted: true,
            query: "ru".into(),
            selection: Some(Item::new("rs", "Rust")),
        };

        let json = format_outcome_json(&outcome).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["accepted"], true);
        assert_eq!(value["query"], "ru");
        assert_eq!(value["selection"]["key"], "rs");
        assert_eq!(value["selection"]["value"], "Rust");
    }

    #[test]
    fn json_format_uses_null_when_cancelled() {
        let outcome = Outcome {
            accepted: false,
            query: String::new(),
            selection: None,
        };

        let json = format_outcome_json(&outcome).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["accepted"], false);
        assert!(value["selection"].is_null());
    }
}
