//! Excel run report
//!
//! One row per scenario on a "Test Results" sheet, written next to earlier
//! runs under `<report_dir>/excel_reports/` with a timestamped file name.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::info;
use rust_xlsxwriter::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scenario::{ScenarioOutcome, Verdict};

pub const SHEET_NAME: &str = "Test Results";
pub const HEADERS: [&str; 8] = [
    "Test Name",
    "Result",
    "Duration (s)",
    "Legacy Status",
    "Gateway Status",
    "Legacy Time (s)",
    "Gateway Time (s)",
    "Message",
];

/// `<report_dir>/excel_reports/api_validation_<YYYYmmdd_HHMMSS>.xlsx`
pub fn report_path(report_dir: &Path, timestamp: DateTime<Local>) -> PathBuf {
    report_dir
        .join("excel_reports")
        .join(format!("api_validation_{}.xlsx", timestamp.format("%Y%m%d_%H%M%S")))
}

/// Write the report for `outcomes` and return where it went
pub fn write_excel_report(report_dir: &Path, outcomes: &[ScenarioOutcome]) -> Result<PathBuf> {
    let path = report_path(report_dir, Local::now());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {:?}", parent))?;
    }

    write_workbook(&path, outcomes)?;
    info!("📊 Excel report generated: {}", path.display());
    Ok(path)
}

/// Write `outcomes` to an .xlsx file at `path`
pub fn write_workbook(path: &Path, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White);
    let passed_format = Format::new().set_background_color(Color::RGB(0x90EE90));
    let failed_format = Format::new().set_background_color(Color::RGB(0xFFB6C1));
    let skipped_format = Format::new().set_background_color(Color::RGB(0xFFFFAA));

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, outcome) in outcomes.iter().enumerate() {
        let row = index as u32 + 1;
        let result_format = match outcome.verdict {
            Verdict::Passed => &passed_format,
            Verdict::Failed(_) => &failed_format,
            Verdict::Skipped(_) => &skipped_format,
        };

        sheet.write_string(row, 0, &outcome.name)?;
        sheet.write_string_with_format(row, 1, outcome.verdict.label(), result_format)?;
        sheet.write_number(row, 2, round2(outcome.duration))?;
        if let Some(status) = outcome.legacy_status {
            sheet.write_number(row, 3, status as f64)?;
        }
        if let Some(status) = outcome.gateway_status {
            sheet.write_number(row, 4, status as f64)?;
        }
        if let Some(elapsed) = outcome.legacy_elapsed {
            sheet.write_number(row, 5, round2(elapsed))?;
        }
        if let Some(elapsed) = outcome.gateway_elapsed {
            sheet.write_number(row, 6, round2(elapsed))?;
        }
        let mut message = outcome.verdict.message().unwrap_or_default().to_string();
        if outcome.latency_warning() {
            if !message.is_empty() {
                message.push_str("; ");
            }
            message.push_str("latency difference above threshold");
        }
        sheet.write_string(row, 7, &message)?;
    }

    sheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;
    Ok(())
}

fn round2(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_path_layout() {
        let ts = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let path = report_path(Path::new("reports"), ts);
        assert_eq!(
            path,
            PathBuf::from("reports/excel_reports/api_validation_20260304_050607.xlsx")
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(Duration::from_millis(1234)), 1.23);
        assert_eq!(round2(Duration::from_millis(7)), 0.01);
    }
}
