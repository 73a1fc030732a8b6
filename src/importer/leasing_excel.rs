// ==========================================
// 租赁报表邮件采集服务 - 客户咨询报表解析器 (Excel)
// ==========================================
// 布局: 第 12 行（0 起）之后为数据区; 物业分组行与数据行交错
// 列位: 0-14 固定位置, Inquiry ID 列按表头动态定位（可缺失）
// ==========================================

use crate::domain::inquiry::Inquiry;
use crate::importer::cell::Cell;
use crate::importer::error::ImportResult;
use crate::importer::grid::{cell_at, Grid};
use crate::importer::row_classifier::{
    find_leasing_header, is_leasing_data_row, is_property_group_row, PropertyTracker,
    INQUIRY_ID_HEADER, LEASING_DATA_START_ROW,
};
use tracing::{debug, info};

/// 解析客户咨询报表 Excel 字节
pub fn parse_leasing_excel(bytes: &[u8]) -> ImportResult<Vec<Inquiry>> {
    let grid = Grid::from_workbook_bytes(bytes)?;
    Ok(parse_leasing_grid(&grid))
}

/// 解析已物化的网格
pub fn parse_leasing_grid(grid: &Grid) -> Vec<Inquiry> {
    let inquiry_id_col = match find_leasing_header(grid) {
        Some((header_row, column_map)) => {
            debug!(header_row, columns = ?column_map, "列映射");
            column_map.get(INQUIRY_ID_HEADER).copied()
        }
        None => None,
    };
    if let Some(col) = inquiry_id_col {
        info!(col, "找到 Inquiry ID 列");
    }

    let mut tracker = PropertyTracker::new();
    let mut inquiries = Vec::new();

    for row in grid.rows().skip(LEASING_DATA_START_ROW) {
        if is_property_group_row(row) {
            tracker.enter(cell_at(row, 0).to_string());
            continue;
        }

        if !is_leasing_data_row(row) {
            continue;
        }

        // 首个物业分组行之前的数据行丢弃
        let Some(property) = tracker.current() else {
            debug!(name = %cell_at(row, 0), "数据行缺少物业上下文, 跳过");
            continue;
        };

        inquiries.push(map_row(property, row, inquiry_id_col));
    }

    info!(count = inquiries.len(), "客户咨询报表 (Excel) 解析完成");
    inquiries
}

fn map_row(property: &str, row: &[Cell], inquiry_id_col: Option<usize>) -> Inquiry {
    let text = |idx: usize| cell_at(row, idx).truthy_string();

    Inquiry {
        property: Some(property.to_string()),
        name: text(0),
        email: text(1),
        phone: text(2),
        inquiry_received: cell_at(row, 3).timestamp_or_raw(),
        first_contact: cell_at(row, 4).date_or_raw(),
        last_activity_date: cell_at(row, 5).date_or_raw(),
        last_activity_type: text(6),
        status: text(7),
        move_in_preference: text(8),
        max_rent: text(9),
        bed_bath_preference: text(10),
        pet_preference: text(11),
        monthly_income: text(12),
        credit_score: text(13),
        lead_type: text(14),
        listing: None,
        inquiry_id: inquiry_id_col.and_then(text),
    }
}
