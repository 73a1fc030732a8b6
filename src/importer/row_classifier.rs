// ==========================================
// 租赁报表邮件采集服务 - 行分类器
// ==========================================
// 职责: 定位表头行、识别物业分组行与数据行
// 状态: PropertyTracker 显式建模 "等待物业" → "已有物业"
// ==========================================

use crate::importer::cell::Cell;
use crate::importer::grid::{cell_at, Grid};
use std::collections::HashMap;

/// 客户咨询报表 (Excel) 数据起始行（模板固定，不由表头推导）
pub const LEASING_DATA_START_ROW: usize = 12;

/// 客户咨询报表中可选的 Inquiry ID 列名
pub const INQUIRY_ID_HEADER: &str = "Inquiry ID";

/// 小计行标记
const UNITS_SUBTOTAL_LABEL: &str = "Units";

// ==========================================
// PropertyTracker - 物业分组状态机
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyTracker {
    #[default]
    AwaitingProperty,
    InProperty(String),
}

impl PropertyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 遇到物业分组行；空名称回到等待状态
    pub fn enter(&mut self, name: impl Into<String>) {
        let name = name.into();
        *self = if name.is_empty() {
            PropertyTracker::AwaitingProperty
        } else {
            PropertyTracker::InProperty(name)
        };
    }

    pub fn current(&self) -> Option<&str> {
        match self {
            PropertyTracker::AwaitingProperty => None,
            PropertyTracker::InProperty(name) => Some(name),
        }
    }
}

// ==========================================
// 行判定
// ==========================================

/// 物业分组行：首列有值，其余列全空
pub fn is_property_group_row(row: &[Cell]) -> bool {
    cell_at(row, 0).is_truthy() && row.iter().skip(1).all(Cell::is_empty)
}

/// 客户咨询数据行：首列有值且第 4 列为原生日期
pub fn is_leasing_data_row(row: &[Cell]) -> bool {
    cell_at(row, 0).is_truthy() && cell_at(row, 3).as_datetime().is_some()
}

/// 全空行
pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_empty)
}

/// "Units" 小计行：单元号包含 Units 且第二列为空
pub fn is_units_subtotal(unit: &str, row: &[Cell]) -> bool {
    unit.contains(UNITS_SUBTOTAL_LABEL) && cell_at(row, 1).is_empty()
}

// ==========================================
// 表头定位
// ==========================================

/// 客户咨询报表表头：首列包含 "Name" 或第二列包含 "Email"
///
/// # 返回
/// - Some((行号, 列名 → 列索引))
/// - None: 未找到
pub fn find_leasing_header(grid: &Grid) -> Option<(usize, HashMap<String, usize>)> {
    grid.rows().enumerate().find_map(|(idx, row)| {
        let is_header = cell_at(row, 0).to_string().contains("Name")
            || cell_at(row, 1).to_string().contains("Email");
        if !is_header {
            return None;
        }

        let column_map = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_truthy())
            .map(|(col, cell)| (cell.to_string().trim().to_string(), col))
            .collect();
        Some((idx, column_map))
    })
}

/// 物业报表表头：首列 == "Unit" 且第二列 == "BD/BA"
pub fn find_property_report_header(grid: &Grid) -> Option<usize> {
    grid.rows().position(|row| {
        cell_at(row, 0).as_text() == Some("Unit") && cell_at(row, 1).as_text() == Some("BD/BA")
    })
}
