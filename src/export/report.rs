//! Plain-text dashboard report.
//!
//! Renders a [`DashboardView`] as the summary badges, totals, top performers
//! and a record table.

use crate::export::csv::{format_count, format_money_k, format_percent};
use crate::models::GroupBy;
use crate::services::session::DashboardView;
use std::fmt::Write as _;

/// Generates the report text.
///
/// `max_rows` caps the record table; the remaining count is noted below it.
pub fn generate_report(view: &DashboardView, group_by: GroupBy, max_rows: usize) -> String {
    let mut output = String::new();

    output.push_str("Active filters: ");
    if view.summary.is_empty() {
        output.push_str("none\n");
    } else {
        let _ = writeln!(output, "{}", view.summary.join(" | "));
    }

    if view.is_empty {
        output.push_str("\nNo records match the current filters.\n");
        return output;
    }

    let totals = &view.totals;
    output.push_str("\nTotals\n");
    let _ = writeln!(output, "  Records:     {}", format_count(totals.records as u64));
    let _ = writeln!(output, "  SMV:         {}", format_money_k(totals.smv));
    let _ = writeln!(output, "  FMV:         {}", format_money_k(totals.fmv));
    let _ = writeln!(output, "  Impressions: {}", format_count(totals.impressions));
    let _ = writeln!(output, "  Views:       {}", format_count(totals.views));
    let _ = writeln!(output, "  Video Views: {}", format_count(totals.video_views));
    let _ = writeln!(output, "  View Rate:   {}", format_percent(totals.view_rate()));

    let _ = writeln!(output, "\nTop performers (by {group_by:?})");
    for (rank, row) in view.top_performers.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {}. {:<24} {:>10} {:>14}",
            rank + 1,
            row.key,
            format_money_k(row.totals.smv),
            format_count(row.totals.impressions)
        );
    }

    output.push_str("\nRecords\n");
    let _ = writeln!(
        output,
        "  {:<5} {:<10} {:<18} {:<14} {:<18} {:>10}",
        "ID", "Date", "Rightsholder", "Sponsor", "Placement", "SMV"
    );
    for record in view.records.iter().take(max_rows) {
        let _ = writeln!(
            output,
            "  {:<5} {:<10} {:<18} {:<14} {:<18} {:>10}",
            record.id,
            record.date,
            record.rightsholder,
            record.sponsor,
            record.placement,
            format_money_k(record.smv)
        );
    }
    if view.records.len() > max_rows {
        let _ = writeln!(output, "  ... {} more", view.records.len() - max_rows);
    }

    output
}
