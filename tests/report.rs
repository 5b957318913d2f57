//! Excel report contents, read back with calamine

use std::time::Duration;

use api_parity::report::{self, HEADERS, SHEET_NAME};
use api_parity::scenario::{ScenarioOutcome, Verdict};
use calamine::{Data, Reader, Xlsx, open_workbook};

fn outcome(name: &str, verdict: Verdict, statuses: Option<(u16, u16)>) -> ScenarioOutcome {
    ScenarioOutcome {
        name: name.to_string(),
        verdict,
        legacy_status: statuses.map(|s| s.0),
        gateway_status: statuses.map(|s| s.1),
        legacy_elapsed: statuses.map(|_| Duration::from_millis(120)),
        gateway_elapsed: statuses.map(|_| Duration::from_millis(340)),
        latency: None,
        structure: None,
        duration: Duration::from_millis(1466),
    }
}

#[test]
fn test_report_rows_match_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let outcomes = vec![
        outcome("001_valid_request_200_ok", Verdict::Passed, Some((200, 200))),
        outcome(
            "003_invalid_url_endpoint_404_not_found",
            Verdict::Failed("Status code mismatch: legacy=404, gateway=500".to_string()),
            Some((404, 500)),
        ),
        outcome(
            "002_valid_request_oauth2_200_ok",
            Verdict::Skipped("No token URL configured for MULESOFT. Skipping OAuth test.".to_string()),
            None,
        ),
    ];

    let path = report::write_excel_report(dir.path(), &outcomes).unwrap();
    assert!(path.starts_with(dir.path().join("excel_reports")));
    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("api_validation_"));
    assert!(file_name.ends_with(".xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();

    for (col, header) in HEADERS.iter().enumerate() {
        assert_eq!(range.get_value((0, col as u32)), Some(&Data::String(header.to_string())));
    }

    assert_eq!(range.get_value((1, 1)), Some(&Data::String("PASSED".to_string())));
    assert_eq!(range.get_value((1, 2)), Some(&Data::Float(1.47)));
    assert_eq!(range.get_value((1, 3)), Some(&Data::Float(200.0)));
    assert_eq!(range.get_value((1, 6)), Some(&Data::Float(0.34)));

    assert_eq!(range.get_value((2, 1)), Some(&Data::String("FAILED".to_string())));
    assert_eq!(range.get_value((2, 4)), Some(&Data::Float(500.0)));
    assert_eq!(
        range.get_value((2, 7)),
        Some(&Data::String("Status code mismatch: legacy=404, gateway=500".to_string()))
    );

    assert_eq!(range.get_value((3, 1)), Some(&Data::String("SKIPPED".to_string())));
}
