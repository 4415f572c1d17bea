//! CSV export of filtered records.
//!
//! Layout: a header row, one row per record, then a trailing `Total` row
//! with column sums. Money columns use a `$…k` suffix, rates a `%` suffix,
//! counts use thousands separators. Quoting is left to the `csv` writer.

use crate::models::Record;
use crate::services::aggregates::Totals;
use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 13] = [
    "ID",
    "Date",
    "Rightsholder",
    "Sponsor",
    "Placement",
    "Placement Type",
    "Platform",
    "SMV",
    "FMV",
    "Impressions",
    "Views",
    "Video Views",
    "View Rate",
];

/// Writes the export to any writer.
pub fn write_csv<W: Write>(records: &[Record], out: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        writer
            .write_record([
                record.id.to_string(),
                record.date.to_string(),
                record.rightsholder.clone(),
                record.sponsor.clone(),
                record.placement.clone(),
                record.placement_type.clone(),
                record.platform.clone(),
                format_money_k(record.smv),
                format_money_k(record.fmv),
                format_count(record.impressions),
                format_count(record.views),
                format_count(record.video_views),
                format_percent(rate(record.views, record.impressions)),
            ])
            .with_context(|| format!("Failed to write CSV row for record {}", record.id))?;
    }

    let totals = Totals::from_records(records);
    writer
        .write_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format_money_k(totals.smv),
            format_money_k(totals.fmv),
            format_count(totals.impressions),
            format_count(totals.views),
            format_count(totals.video_views),
            format_percent(totals.view_rate()),
        ])
        .context("Failed to write CSV total row")?;

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Renders the export to a string.
pub fn to_csv_string(records: &[Record]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}

/// Writes the export to a file.
pub fn export_to_file(records: &[Record], path: &Path) -> Result<()> {
    let content = to_csv_string(records)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write CSV export to {}", path.display()))
}

/// Formats thousands of dollars as `$12.3k`.
#[must_use]
pub fn format_money_k(value: f64) -> String {
    format!("${value:.1}k")
}

/// Formats a percentage as `45.2%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Formats an integer with thousands separators (`1,234,567`).
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
