//! Console output for encode, query and info commands.

use std::path::Path;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use dictcol_core::query::format_result_line;
use dictcol_core::{ArtifactStats, EncodeSummary, QueryOutcome, QueryReport};

/// Print the result of an encode run
pub fn print_encode_summary(summary: &EncodeSummary) {
    println!(
        "Data encoded in {:.1} seconds using {} workers",
        summary.elapsed.as_secs_f64(),
        summary.workers
    );
    println!(
        "  {} rows, {} unique values -> {}",
        summary.rows,
        summary.unique_values,
        summary.artifact_path.display()
    );
}

/// Print the outcome and timing of a query
pub fn print_query_report(report: &QueryReport) {
    match &report.outcome {
        QueryOutcome::ItemFound { item, indices } => {
            println!("{}", format_result_line(item, indices).green());
        }
        QueryOutcome::ItemNotFound { item } => {
            println!("{}", format!("Item '{item}' not found.").yellow());
        }
        QueryOutcome::PrefixMatched {
            prefix,
            matches,
            results_path,
        } => {
            println!(
                "{} items found with prefix '{}', results written to {}",
                matches.len().to_string().green(),
                prefix,
                results_path.display()
            );
        }
        QueryOutcome::NoPrefixMatches { prefix } => {
            println!("{}", format!("No items found with prefix '{prefix}'.").yellow());
        }
    }
    println!("Query time: {:.4} seconds", report.elapsed.as_secs_f64());
}

/// Print artifact statistics in the specified format
pub fn print_stats(path: &Path, stats: &ArtifactStats, format: &str) -> anyhow::Result<()> {
    match format.to_lowercase().as_str() {
        "json" => {
            let value = serde_json::json!({
                "artifact": path.display().to_string(),
                "rows": stats.rows,
                "unique_values": stats.unique_values,
                "raw_size_bytes": stats.raw_size_bytes,
                "dictionary_size_bytes": stats.dictionary_size_bytes,
                "encoded_size_bytes": stats.encoded_size_bytes,
                "compression_ratio": stats.compression_ratio,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        _ => {
            println!("DictCol Artifact: {}", path.display());

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    Cell::new("Metric").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![Cell::new("Rows"), Cell::new(stats.rows)]);
            table.add_row(vec![
                Cell::new("Unique values"),
                Cell::new(stats.unique_values),
            ]);
            table.add_row(vec![
                Cell::new("Raw size (bytes)"),
                Cell::new(stats.raw_size_bytes),
            ]);
            table.add_row(vec![
                Cell::new("Dictionary size (bytes)"),
                Cell::new(stats.dictionary_size_bytes),
            ]);
            table.add_row(vec![
                Cell::new("Encoded size (bytes)"),
                Cell::new(stats.encoded_size_bytes),
            ]);
            table.add_row(vec![
                Cell::new("Compression ratio"),
                Cell::new(format!("{:.2}x", stats.compression_ratio)),
            ]);

            println!("{table}");
        }
    }
    Ok(())
}
