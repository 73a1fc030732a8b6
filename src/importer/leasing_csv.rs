// ==========================================
// 租赁报表邮件采集服务 - 客户咨询报表解析器 (CSV)
// ==========================================
// 布局: 首行为列名; Name 以 "->" 开头的行为物业分组行
// 说明: 与 Excel 版按列名取值（非位置列），两者互不通用
// ==========================================

use crate::domain::inquiry::{Inquiry, ListingDetails};
use crate::domain::types::{iso_date, iso_timestamp};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_classifier::PropertyTracker;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// 物业分组行标记
pub const PROPERTY_MARKER: &str = "->";

/// 咨询时间格式，如 "12/29/2025 at 01:19 PM"
const RECEIVED_FORMAT: &str = "%m/%d/%Y at %I:%M %p";

/// 纯日期格式，如 "12/29/2025"
const DATE_FORMAT: &str = "%m/%d/%Y";

// ===== 列名 =====
const COL_NAME: &str = "Name";
const COL_EMAIL: &str = "Email Address";
const COL_PHONE: &str = "Phone Number";
const COL_INQUIRY_RECEIVED: &str = "Inquiry Received";
const COL_FIRST_CONTACT: &str = "First Contact Date";
const COL_LAST_ACTIVITY_DATE: &str = "Last Activity Date";
const COL_LAST_ACTIVITY_TYPE: &str = "Last Activity Type";
const COL_STATUS: &str = "Status";
const COL_MOVE_IN: &str = "Move In Preference";
const COL_MAX_RENT: &str = "Max Rent";
const COL_BED_BATH: &str = "Bed Bath Preference";
const COL_PET: &str = "Pet Preference";
const COL_MONTHLY_INCOME: &str = "Monthly Income";
const COL_CREDIT_SCORE: &str = "Credit Score";
const COL_LEAD_TYPE: &str = "Lead Type";
const COL_SOURCE: &str = "Source";
const COL_UNIT: &str = "Unit";
const COL_TOUCH_POINTS: &str = "Touch Points";
const COL_FOLLOW_UPS: &str = "Follow Ups";

/// 解析客户咨询报表 CSV 字节（UTF-8，允许 BOM）
pub fn parse_leasing_csv(bytes: &[u8]) -> ImportResult<Vec<Inquiry>> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    info!(columns = ?headers, "CSV 列");

    let inquiry_id_field = find_inquiry_id_field(&headers);
    if let Some(field) = &inquiry_id_field {
        info!(field = %field, "找到 Inquiry ID 列");
    }

    let mut tracker = PropertyTracker::new();
    let mut inquiries = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let row = CsvRow::new(&headers, &record, line);

        let name = row.raw(COL_NAME).trim();
        if name.is_empty() {
            continue;
        }

        if name.starts_with(PROPERTY_MARKER) {
            tracker.enter(name.replace(PROPERTY_MARKER, "").trim());
            continue;
        }

        let Some(property) = tracker.current() else {
            debug!(line, "数据行缺少物业上下文, 跳过");
            continue;
        };

        let received_raw = row.raw(COL_INQUIRY_RECEIVED);
        if received_raw.trim().is_empty() {
            continue;
        }

        inquiries.push(Inquiry {
            property: Some(property.to_string()),
            name: Some(name.to_string()),
            email: row.field(COL_EMAIL),
            phone: row.field(COL_PHONE),
            inquiry_received: received_timestamp(received_raw),
            first_contact: non_empty(row.raw(COL_FIRST_CONTACT)).map(first_contact_date),
            last_activity_date: non_empty(row.raw(COL_LAST_ACTIVITY_DATE)).map(plain_date),
            last_activity_type: row.field(COL_LAST_ACTIVITY_TYPE),
            status: row.field(COL_STATUS),
            move_in_preference: row.field(COL_MOVE_IN),
            max_rent: row.field(COL_MAX_RENT),
            bed_bath_preference: row.field(COL_BED_BATH),
            pet_preference: row.field(COL_PET),
            monthly_income: row.field(COL_MONTHLY_INCOME),
            credit_score: row.field(COL_CREDIT_SCORE),
            lead_type: row.field(COL_LEAD_TYPE),
            listing: Some(ListingDetails {
                source: row.field(COL_SOURCE),
                unit: row.field(COL_UNIT),
                touch_points: row.parse_count(COL_TOUCH_POINTS)?,
                follow_ups: row.parse_count(COL_FOLLOW_UPS)?,
            }),
            inquiry_id: inquiry_id_field.as_deref().and_then(|f| row.field(f)),
        });
    }

    info!(count = inquiries.len(), "客户咨询报表 (CSV) 解析完成");
    Ok(inquiries)
}

/// 列名同时包含 "inquiry" 与 "id"（不区分大小写）
fn find_inquiry_id_field(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| {
            let lower = h.to_lowercase();
            lower.contains("inquiry") && lower.contains("id")
        })
        .cloned()
}

// ==========================================
// CsvRow - 列名 → 值
// ==========================================
struct CsvRow<'a> {
    values: HashMap<&'a str, &'a str>,
    line: usize,
}

impl<'a> CsvRow<'a> {
    fn new(headers: &'a [String], record: &'a StringRecord, line: usize) -> Self {
        let values = headers
            .iter()
            .map(String::as_str)
            .zip(record.iter())
            .collect();
        Self { values, line }
    }

    /// 原始值（缺列视为空串）
    fn raw(&self, key: &str) -> &'a str {
        self.values.get(key).copied().unwrap_or("")
    }

    /// 去空白后的非空值
    fn field(&self, key: &str) -> Option<String> {
        non_empty(self.raw(key)).map(|v| v.trim().to_string())
    }

    /// 计数字段：空 → None，非整数 → 类型转换错误
    fn parse_count(&self, key: &str) -> ImportResult<Option<i64>> {
        match self.field(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: self.line,
                    field: key.to_string(),
                    message: format!("无法解析为整数: {}", value),
                }),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ==========================================
// 日期转换（解析失败原样透传）
// ==========================================

fn received_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw.trim(), RECEIVED_FORMAT)
        .map(|dt| iso_timestamp(&dt))
        .unwrap_or_else(|_| raw.to_string())
}

fn first_contact_date(raw: &str) -> String {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, RECEIVED_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DATE_FORMAT))
        .map(|d| iso_date(&d))
        .unwrap_or_else(|_| raw.to_string())
}

fn plain_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| iso_date(&d))
        .unwrap_or_else(|_| raw.to_string())
}
