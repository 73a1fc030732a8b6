// ==========================================
// 租赁报表邮件采集服务 - 单元格值模型
// ==========================================
// 职责: 将工作表原始值收敛为带标签的单元格类型,并提供逐字段的强制转换
// 说明: 报表单元格可能是文本、数值、日期或空值,没有声明式 schema
// ==========================================

use crate::domain::types::{iso_date, iso_timestamp};
use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// 单元格值
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 真值判定：空、空串、0、false 视为假
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(s) => !s.is_empty(),
            Cell::Number(n) => *n != 0.0,
            Cell::Bool(b) => *b,
            Cell::DateTime(_) => true,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Cell::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 真值时返回字符串表示，否则 None
    pub fn truthy_string(&self) -> Option<String> {
        if self.is_truthy() {
            Some(self.to_string())
        } else {
            None
        }
    }

    /// 原生日期 → `YYYY-MM-DD`；其他真值按字符串透传；假值 → None
    pub fn date_or_raw(&self) -> Option<String> {
        match self {
            Cell::DateTime(dt) => Some(iso_date(&dt.date())),
            other => other.truthy_string(),
        }
    }

    /// 仅原生日期单元格输出 `YYYY-MM-DD`，日期样式的文本不转换
    pub fn native_date(&self) -> Option<String> {
        self.as_datetime().map(|dt| iso_date(&dt.date()))
    }

    /// 原生日期 → ISO 时间戳；其他值按字符串透传
    pub fn timestamp_or_raw(&self) -> String {
        match self {
            Cell::DateTime(dt) => iso_timestamp(dt),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            // 整数值不输出小数部分（1200.0 → "1200"）
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::text(s.as_str()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
                Some(value) => Cell::DateTime(value),
                None => Cell::Number(dt.as_f64()),
            },
            // 时长类单元格按数值处理
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) => parse_iso_datetime(s)
                .map(Cell::DateTime)
                .unwrap_or_else(|| Cell::text(s.as_str())),
            Data::DurationIso(s) => Cell::text(s.as_str()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
