// ==========================================
// 本地样例上传集成测试
// ==========================================
// 测试目标: 文件名路由、缺失文件跳过、上报元数据
// ==========================================


use rental_report_ingest::domain::ReportKind;
use rental_report_ingest::ingest::{upload_file, SampleOutcome, Uploader};
use std::time::Duration;
use tempfile::TempDir;
use test_helpers::{leasing_csv, RecordingTransport};

fn uploader(status: u16) -> Uploader<RecordingTransport> {
    Uploader::new(
        "http://localhost:3000/api",
        Duration::from_secs(5),
        RecordingTransport::with_status(status),
    )
}

#[tokio::test]
async fn test_csv_sample_uploaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guest_card_inquiries-20260127.csv");
    std::fs::write(&path, leasing_csv("Jane")).unwrap();
    let uploader = uploader(200);

    let outcome = upload_file(&uploader, &path).await;

    assert_eq!(
        outcome,
        SampleOutcome::Uploaded {
            kind: ReportKind::LeasingCsv,
            count: 1
        }
    );
    assert_eq!(outcome.to_string(), "Leasing Report: uploaded (1 records)");

    let body = &uploader.transport().bodies()[0];
    assert_eq!(
        body["metadata"]["email_subject"],
        "Local sample upload - Leasing Report"
    );
    assert_eq!(body["metadata"]["filename"], "guest_card_inquiries-20260127.csv");
    assert_eq!(body["metadata"]["email_date"], body["metadata"]["received_at"]);
}

#[tokio::test]
async fn test_rejected_upload_reported_as_failed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guest_card.csv");
    std::fs::write(&path, leasing_csv("Jane")).unwrap();

    let outcome = upload_file(&uploader(500), &path).await;

    assert_eq!(outcome.to_string(), "Leasing Report: failed (1 records)");
}

#[tokio::test]
async fn test_missing_file_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rent_roll_itemized-20260127.xlsx");
    let uploader = uploader(200);

    let outcome = upload_file(&uploader, &path).await;

    assert_eq!(
        outcome,
        SampleOutcome::Missing {
            kind: ReportKind::PropertyReport,
            filename: "rent_roll_itemized-20260127.xlsx".to_string()
        }
    );
    assert_eq!(uploader.transport().call_count(), 0);
}

#[tokio::test]
async fn test_unknown_file_name_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.xlsx");
    std::fs::write(&path, b"whatever").unwrap();

    let outcome = upload_file(&uploader(200), &path).await;

    assert!(matches!(outcome, SampleOutcome::UnknownKind { .. }));
}

#[tokio::test]
async fn test_unparseable_sample_not_uploaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rent_roll.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();
    let uploader = uploader(200);

    let outcome = upload_file(&uploader, &path).await;

    assert_eq!(
        outcome,
        SampleOutcome::NoRecords {
            kind: ReportKind::PropertyReport
        }
    );
    assert_eq!(uploader.transport().call_count(), 0);
}
