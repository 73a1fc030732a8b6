// ==========================================
// 租赁报表邮件采集服务 - 上报载荷
// ==========================================
// 线上契约: { "records": [...], "metadata": { filename, email_subject, email_date, received_at } }
// ==========================================

use crate::domain::inquiry::Inquiry;
use crate::domain::unit::UnitRecord;
use serde::{Deserialize, Serialize};

/// 上报元数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub filename: String,
    pub email_subject: Option<String>,
    pub email_date: Option<String>, // 原始 Date 头
    pub received_at: String,        // 本地处理时间 (ISO)
}

/// 一个附件解析后的记录集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedReport {
    Inquiries(Vec<Inquiry>),
    Units(Vec<UnitRecord>),
}

impl ParsedReport {
    pub fn len(&self) -> usize {
        match self {
            ParsedReport::Inquiries(records) => records.len(),
            ParsedReport::Units(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 上报请求体
#[derive(Debug, Serialize)]
pub struct UploadPayload<'a> {
    pub records: &'a ParsedReport,
    pub metadata: &'a UploadMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let records = ParsedReport::Units(vec![UnitRecord {
            property: "Maple Court".to_string(),
            unit: "101".to_string(),
            total: Some(1250.5),
            ..Default::default()
        }]);
        let metadata = UploadMetadata {
            filename: "rent_roll_itemized-20260127.xlsx".to_string(),
            email_subject: Some("Rent Roll".to_string()),
            email_date: None,
            received_at: "2026-01-27T08:00:00".to_string(),
        };

        let json = serde_json::to_value(UploadPayload {
            records: &records,
            metadata: &metadata,
        })
        .unwrap();

        assert!(json["records"].is_array());
        assert_eq!(json["records"][0]["unit"], "101");
        assert_eq!(json["records"][0]["total"], 1250.5);
        assert_eq!(json["metadata"]["filename"], "rent_roll_itemized-20260127.xlsx");
        assert!(json["metadata"]["email_date"].is_null());
    }

    #[test]
    fn test_parsed_report_len() {
        assert!(ParsedReport::Inquiries(vec![]).is_empty());
        assert_eq!(ParsedReport::Units(vec![UnitRecord::default()]).len(), 1);
    }
}
