// ==========================================
// 租赁报表邮件采集服务 - 本地样例上传
// ==========================================
// 用途: 不经过邮箱，直接把本地报表文件解析并上报（联调 API 用）
// ==========================================

use crate::domain::payload::UploadMetadata;
use crate::domain::types::{iso_timestamp, ReportKind};
use crate::importer::report_parser::parser_for;
use crate::ingest::attachment_router::{route_attachment, RouteDecision};
use crate::ingest::uploader::{HttpTransport, Uploader};
use chrono::Local;
use std::fmt;
use std::path::Path;
use tracing::{error, warn};

/// 单个样例文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// 文件名无法识别报表类型
    UnknownKind { filename: String },
    /// 文件不存在或不可读
    Missing { kind: ReportKind, filename: String },
    /// 解析失败或无记录
    NoRecords { kind: ReportKind },
    Uploaded { kind: ReportKind, count: usize },
    Failed { kind: ReportKind, count: usize },
}

impl fmt::Display for SampleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleOutcome::UnknownKind { filename } => {
                write!(f, "Skipping {}: unknown report type", filename)
            }
            SampleOutcome::Missing { kind, filename } => {
                write!(f, "Skipping {}: {} not found", kind.label(), filename)
            }
            SampleOutcome::NoRecords { kind } => {
                write!(f, "No records parsed for {}", kind.label())
            }
            SampleOutcome::Uploaded { kind, count } => {
                write!(f, "{}: uploaded ({} records)", kind.label(), count)
            }
            SampleOutcome::Failed { kind, count } => {
                write!(f, "{}: failed ({} records)", kind.label(), count)
            }
        }
    }
}

/// 解析并上报一个本地文件
///
/// 元数据: email_subject = "Local sample upload - <label>"，
/// email_date 与 received_at 均为当前本地时间
pub async fn upload_file<T: HttpTransport>(uploader: &Uploader<T>, path: &Path) -> SampleOutcome {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let kind = match route_attachment(&filename) {
        RouteDecision::Report(kind) => kind,
        _ => return SampleOutcome::UnknownKind { filename },
    };

    let contents = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "样例文件不可读");
            return SampleOutcome::Missing { kind, filename };
        }
    };

    let records = match parser_for(kind).parse(&contents) {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => return SampleOutcome::NoRecords { kind },
        Err(e) => {
            error!(path = %path.display(), error = %e, "样例文件解析失败");
            return SampleOutcome::NoRecords { kind };
        }
    };

    let now = iso_timestamp(&Local::now().naive_local());
    let metadata = UploadMetadata {
        filename,
        email_subject: Some(format!("Local sample upload - {}", kind.label())),
        email_date: Some(now.clone()),
        received_at: now,
    };

    let count = records.len();
    match uploader.send(kind.endpoint(), &records, &metadata).await {
        Ok(()) => SampleOutcome::Uploaded { kind, count },
        Err(_) => SampleOutcome::Failed { kind, count },
    }
}
