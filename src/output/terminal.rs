// Colored terminal output for rankings, comparisons and prepared text.
//
// main.rs delegates all human-readable display here.

use std::path::Path;

use colored::Colorize;

use crate::embeddings::EncoderId;
use crate::error::ExtractError;
use crate::keywords::ScoreOrder;
use crate::pipeline::{Extraction, PreparedText, StrategyOutcome};
use crate::presets::Preset;

/// Display one strategy's ranked keywords as a table.
pub fn display_extraction(extraction: &Extraction) {
    println!(
        "\n{}",
        format!("=== {} ({} keywords) ===", extraction.label, extraction.ranking.len()).bold()
    );

    if extraction.ranking.is_empty() {
        println!("  {}", "No keywords: the text is only stopwords.".dimmed());
        return;
    }

    let hint = match extraction.order() {
        ScoreOrder::HigherIsBetter => "higher is better",
        ScoreOrder::LowerIsBetter => "lower is better",
    };
    println!("  {}", format!("Scores: {hint}").dimmed());
    println!();
    println!(
        "  {:>4}  {:<28} {:>10}",
        "Rank".dimmed(),
        "Keyword".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(46).dimmed());

    for (i, entry) in extraction.ranking.entries.iter().enumerate() {
        let keyword = if i < 3 {
            entry.keyword.bold().to_string()
        } else {
            entry.keyword.normal().to_string()
        };
        println!(
            "  {:>4}. {:<28} {:>10.4}",
            i + 1,
            keyword,
            entry.score
        );
    }
}

/// Display every outcome of a comparison run, failures included.
pub fn display_comparison(outcomes: &[StrategyOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(extraction) => display_extraction(extraction),
            Err(e) => {
                println!(
                    "\n{}",
                    format!("=== {} ===", outcome.strategy.label()).bold()
                );
                println!("  {} {}", "skipped:".yellow(), describe_error(e));
            }
        }
    }

    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    println!();
    println!(
        "  {} of {} strategies produced a ranking",
        ok.to_string().green(),
        outcomes.len()
    );
}

/// Display the cleaned text and the tokens left after stopword filtering.
pub fn display_prepared(prepared: &PreparedText) {
    println!("\n{}", "=== Cleaned text ===".bold());
    if prepared.cleaned.is_empty() {
        println!("  {}", "(empty)".dimmed());
    } else {
        println!("  {}", prepared.cleaned);
    }

    println!(
        "\n{}",
        format!("=== Tokens without stopwords ({}) ===", prepared.tokens.len()).bold()
    );
    if prepared.tokens.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        println!("  {}", prepared.tokens.join(" "));
    }
}

/// Display the built-in topics with a short preview of each text.
pub fn display_topics(presets: &[Preset]) {
    println!("\n{}", format!("=== Topics ({}) ===", presets.len()).bold());
    println!();
    for preset in presets {
        println!(
            "  {:<24} {:<20} {}",
            preset.slug.cyan(),
            preset.name,
            super::preview(preset.text, 50).dimmed()
        );
    }
}

/// Display the model directory and which encoders are installed.
pub fn display_status(model_dir: &Path, installed: &[EncoderId]) {
    println!("\n{}", "=== Arabic Keywords Status ===".bold());
    println!("  Model directory: {}", model_dir.display());
    println!();

    for id in EncoderId::ALL {
        let state = if installed.contains(&id) {
            "installed".green()
        } else {
            "missing".red()
        };
        println!("  {:<14} {:<10} {}", id.name(), state, id.model_id().dimmed());
    }

    if installed.len() < EncoderId::ALL.len() {
        println!();
        println!(
            "  {}",
            "Export missing models to ONNX and place model.onnx and tokenizer.json in",
        );
        println!(
            "  {}",
            format!("{}/<encoder>/", model_dir.display()).dimmed()
        );
        println!("  TF-IDF and YAKE work without any model.");
    }
}

/// One-line explanation of an error for the terminal.
pub fn describe_error(err: &ExtractError) -> String {
    match err {
        ExtractError::EmptyInput => "no Arabic text left after cleaning".to_string(),
        ExtractError::BackendUnavailable { backend, reason } => {
            let first_line = reason.lines().next().unwrap_or(reason);
            format!("encoder '{backend}' unavailable ({first_line})")
        }
        ExtractError::InvalidConfiguration(msg) => msg.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_backend_error_keeps_first_line() {
        let err = ExtractError::backend("arabert", "model not found\nExport it first");
        assert_eq!(
            describe_error(&err),
            "encoder 'arabert' unavailable (model not found)"
        );
    }

    #[test]
    fn test_describe_empty_input() {
        assert!(describe_error(&ExtractError::EmptyInput).contains("no Arabic text"));
    }
}
