//! Report generator.
//!
//! Builds a tabular snapshot of the current state and serializes it as a
//! comma-separated report. Delivery goes through the [`ReportSink`] trait so
//! the core stays independent of where the file ends up.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate};

use crate::error::{EnergizeError, Result};
use super::state::SystemState;

pub const REPORT_TITLE: &str = "EnergizeAI - Energy Management Report";
pub const REPORT_MIME: &str = "text/csv";

/// Build the ordered report rows: header block, per-machine table, system
/// health table, and the numbered AI recommendations.
pub fn build_report_rows(state: &SystemState, generated_at: DateTime<Local>) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = vec![
        vec![REPORT_TITLE.to_string()],
        vec![
            "Generated:".to_string(),
            generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
        vec![String::new()],
        vec![
            "System Status:".to_string(),
            if state.is_online { "Online" } else { "Offline" }.to_string(),
        ],
        vec![
            "Total Live Usage:".to_string(),
            format!("{:.2} kWh", state.live_usage),
        ],
        vec![
            "Total Savings Today:".to_string(),
            format!("${:.2}", state.total_savings),
        ],
        vec![String::new()],
        vec!["Machine Status Report:".to_string()],
        vec![
            "Machine Name".to_string(),
            "Status".to_string(),
            "Usage (kWh)".to_string(),
            "Efficiency (%)".to_string(),
            "Temperature (°C)".to_string(),
        ],
    ];

    for machine in &state.machines {
        rows.push(vec![
            machine.name.clone(),
            machine.status.to_string(),
            format!("{:.2}", machine.usage_kwh),
            format!("{:.1}", machine.efficiency),
            format!("{:.1}", machine.temperature),
        ]);
    }

    rows.push(vec![String::new()]);
    rows.push(vec!["System Health:".to_string()]);
    rows.push(vec!["Component".to_string(), "Usage (%)".to_string()]);
    rows.push(vec!["CPU".to_string(), format!("{:.1}", state.health.cpu)]);
    rows.push(vec![
        "Memory".to_string(),
        format!("{:.1}", state.health.memory),
    ]);
    rows.push(vec![
        "Network".to_string(),
        format!("{:.1}", state.health.network),
    ]);

    rows.push(vec![String::new()]);
    rows.push(vec!["AI Recommendations:".to_string()]);
    for (index, suggestion) in state.ai_suggestions.iter().enumerate() {
        rows.push(vec![format!("{}.", index + 1), suggestion.clone()]);
    }

    rows
}

/// Serialize rows by joining fields with commas and rows with newlines.
///
/// Fields are not quoted or escaped: an embedded comma or newline shifts the
/// column structure. Known correctness gap, kept to match the shipped report.
pub fn rows_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Report filename for the given date
pub fn report_filename(date: NaiveDate) -> String {
    format!("energize-ai-report-{}.csv", date.format("%Y-%m-%d"))
}

/// File-download collaborator: offers named content to the user
pub trait ReportSink {
    fn deliver(&mut self, filename: &str, mime: &str, content: &[u8]) -> Result<PathBuf>;
}

/// Sink that writes reports into a directory on disk
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileSink {
    fn deliver(&mut self, filename: &str, _mime: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Build the report for the current state and deliver it through `sink`.
///
/// A failed delivery surfaces as [`EnergizeError::Report`] naming the file.
pub fn export_to(
    sink: &mut dyn ReportSink,
    state: &SystemState,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    let rows = build_report_rows(state, generated_at);
    let csv = rows_to_csv(&rows);
    let filename = report_filename(generated_at.date_naive());
    sink.deliver(&filename, REPORT_MIME, csv.as_bytes())
        .map_err(|err| EnergizeError::report(format!("could not deliver {}: {}", filename, err)))
}
