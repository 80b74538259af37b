// Output formatting: terminal tables and JSON documents.

pub mod terminal;

use serde_json::{json, Value};

use crate::pipeline::StrategyOutcome;

/// Single-line preview of `text`, at most `max_chars` characters plus "...".
///
/// Counts characters, not bytes, so Arabic text never splits mid-letter.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let truncated: String = flat.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// JSON document for a comparison run: one object per strategy holding
/// either its ranking or its error.
pub fn comparison_json(outcomes: &[StrategyOutcome]) -> Value {
    let results: Vec<Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(extraction) => json!(extraction),
            Err(e) => json!({
                "strategy": outcome.strategy,
                "label": outcome.strategy.label(),
                "error": e.to_string(),
            }),
        })
        .collect();
    json!({ "results": results })
}
