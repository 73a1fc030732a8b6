// ==========================================
// 租赁报表邮件采集服务 - 领域类型定义
// ==========================================

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 上报端点 (Endpoint)
// ==========================================
// 路径拼接在 API 基地址之后: <base-url>/<endpoint>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Inquiries,       // 客户咨询
    PropertyReports, // 物业/租金报表
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Inquiries => "inquiries",
            Endpoint::PropertyReports => "property-reports",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

// ==========================================
// 报表类型 (Report Kind)
// ==========================================
// 决定使用哪个解析器以及上报到哪个端点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    LeasingExcel,   // 客户咨询报表 (Excel, 位置列)
    LeasingCsv,     // 客户咨询报表 (CSV, 列名驱动)
    PropertyReport, // 物业/租金明细报表 (Excel)
}

impl ReportKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ReportKind::LeasingExcel | ReportKind::LeasingCsv => Endpoint::Inquiries,
            ReportKind::PropertyReport => Endpoint::PropertyReports,
        }
    }

    /// 日志与样例上传使用的可读名称
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::LeasingExcel | ReportKind::LeasingCsv => "Leasing Report",
            ReportKind::PropertyReport => "Property Report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::LeasingExcel => write!(f, "LEASING_EXCEL"),
            ReportKind::LeasingCsv => write!(f, "LEASING_CSV"),
            ReportKind::PropertyReport => write!(f, "PROPERTY_REPORT"),
        }
    }
}

// ==========================================
// 时间格式化
// ==========================================

/// ISO-8601 本地时间戳: `YYYY-MM-DDTHH:MM:SS`，微秒非零时追加 `.ffffff`
pub fn iso_timestamp(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// 日历日期: `YYYY-MM-DD`
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
