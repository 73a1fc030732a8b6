// ==========================================
// 租赁报表邮件采集服务 - 客户咨询记录
// ==========================================
// 用途: 客户咨询报表 (Guest Card Inquiries) 的一行
// 对齐: 上报接口 /inquiries 的 records 元素
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Inquiry - 客户咨询记录
// ==========================================
// 红线: property 必须来自最近一次出现的物业分组行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    // ===== 分组 =====
    pub property: Option<String>, // 所属物业

    // ===== 联系方式 =====
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    // ===== 时间信息 =====
    pub inquiry_received: String,           // ISO 时间戳（解析失败时保留原值）
    pub first_contact: Option<String>,      // YYYY-MM-DD（解析失败时保留原值）
    pub last_activity_date: Option<String>, // YYYY-MM-DD（解析失败时保留原值）

    // ===== 跟进与偏好 =====
    pub last_activity_type: Option<String>,
    pub status: Option<String>,
    pub move_in_preference: Option<String>,
    pub max_rent: Option<String>,
    pub bed_bath_preference: Option<String>,
    pub pet_preference: Option<String>,
    pub monthly_income: Option<String>,
    pub credit_score: Option<String>,
    pub lead_type: Option<String>,

    // ===== CSV 专有字段 =====
    // Excel 报表不输出这些键
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingDetails>,

    pub inquiry_id: Option<String>, // 仅当报表包含 Inquiry ID 列时有值
}

/// CSV 报表额外提供的房源/跟进字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub source: Option<String>,
    pub unit: Option<String>,
    pub touch_points: Option<i64>, // 空值为 null，而不是 0
    pub follow_ups: Option<i64>,
}
