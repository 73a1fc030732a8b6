// ==========================================
// 租赁报表邮件采集服务 - 附件路由
// ==========================================
// 规则: 按小写文件名子串判定报表类型
// - guest_card / leasing → 客户咨询（.csv 走 CSV 解析器，其余走 Excel）
// - rent_roll / property → 物业报表
// ==========================================

use crate::domain::types::ReportKind;

/// 接受的表格扩展名
const SPREADSHEET_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

const LEASING_MARKERS: [&str; 2] = ["guest_card", "leasing"];
const PROPERTY_MARKERS: [&str; 2] = ["rent_roll", "property"];

/// 路由结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 非表格附件，静默忽略
    NotSpreadsheet,
    /// 表格附件但文件名无法识别报表类型
    Unrecognized,
    Report(ReportKind),
}

pub fn is_spreadsheet(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    SPREADSHEET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn route_attachment(filename: &str) -> RouteDecision {
    if !is_spreadsheet(filename) {
        return RouteDecision::NotSpreadsheet;
    }

    let lower = filename.to_lowercase();
    if LEASING_MARKERS.iter().any(|m| lower.contains(m)) {
        if lower.ends_with(".csv") {
            RouteDecision::Report(ReportKind::LeasingCsv)
        } else {
            RouteDecision::Report(ReportKind::LeasingExcel)
        }
    } else if PROPERTY_MARKERS.iter().any(|m| lower.contains(m)) {
        RouteDecision::Report(ReportKind::PropertyReport)
    } else {
        RouteDecision::Unrecognized
    }
}
