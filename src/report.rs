use std::fmt::Write;
use std::path::Path;

use chrono::Utc;

use crate::dashboard::TableRow;
use crate::models::Signal;
use crate::status::SignalStatus;

#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub status: SignalStatus,
    pub count: usize,
}

/// Counts signals per derived status, most frequent first.
pub fn summarize_by_status(signals: &[Signal]) -> Vec<StatusSummary> {
    let mut summaries: Vec<StatusSummary> = [
        SignalStatus::Pending,
        SignalStatus::Acknowledged,
        SignalStatus::Completed,
    ]
    .into_iter()
    .map(|status| StatusSummary {
        status,
        count: signals.iter().filter(|s| s.status() == status).count(),
    })
    .filter(|summary| summary.count > 0)
    .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

/// Markdown snapshot of the board: status mix, open signals, full table.
pub fn build_report(signals: &[Signal], rows: &[TableRow]) -> String {
    let summaries = summarize_by_status(signals);

    let mut output = String::new();
    let _ = writeln!(output, "# Distress Signal Report");
    let _ = writeln!(output, "Generated at {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No signals on the board.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(output, "- {}: {} signals", summary.status, summary.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Open Signals");

    let open: Vec<&Signal> = signals
        .iter()
        .filter(|signal| signal.status() != SignalStatus::Completed)
        .collect();

    if open.is_empty() {
        let _ = writeln!(output, "No open signals.");
    } else {
        for signal in open {
            let _ = write!(
                output,
                "- signal {} ({}) for {} at {}, responder {}",
                signal.id,
                signal.status(),
                signal.pwid.name,
                signal.location.address,
                signal.responder_name().unwrap_or("None")
            );
            if let Some(created_at) = signal.created_at.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(output, ", reported {created_at}");
            }
            // Sent as "" until a responder acknowledges.
            if let Some(acknowledged_at) =
                signal.acknowledged_at.as_deref().filter(|s| !s.is_empty())
            {
                let _ = write!(output, ", acknowledged {acknowledged_at}");
            }
            let _ = writeln!(output);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Signal Table");
    let _ = writeln!(output, "| ID | PWID | Responder | Location | Status |");
    let _ = writeln!(output, "| --- | --- | --- | --- | --- |");
    for row in rows {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            row.id, row.pwid, row.responder, row.address, row.status
        );
    }

    output
}

/// Writes the table rows to a CSV file for handoff to other tooling.
pub fn export_csv(rows: &[TableRow], path: &Path) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "pwid", "responder", "location", "status"])?;

    for row in rows {
        writer.write_record([
            row.id.to_string().as_str(),
            row.pwid.as_str(),
            row.responder.as_str(),
            row.address.as_str(),
            row.status.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(rows.len())
}
