// ==========================================
// 租赁报表邮件采集服务 - 物业报表解析器 (Excel)
// ==========================================
// 布局: "Unit" / "BD/BA" 表头行之后为数据区（表头缺失即解析失败）
// 列位: 0-19 固定位置, 物业分组行与单元行交错, "Units" 小计行剔除
// ==========================================

use crate::domain::unit::UnitRecord;
use crate::importer::cell::Cell;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::grid::{cell_at, Grid};
use crate::importer::row_classifier::{
    find_property_report_header, is_blank_row, is_property_group_row, is_units_subtotal,
    PropertyTracker,
};
use tracing::{error, info};

// ===== 列位 =====
const COL_UNIT: usize = 0;
const COL_BD_BA: usize = 1;
const COL_STATUS: usize = 2;
const COL_SQFT: usize = 3;
const COL_TOTAL: usize = 4;
const COL_LEASE_FROM: usize = 18;
const COL_LEASE_TO: usize = 19;

/// 解析物业报表 Excel 字节
pub fn parse_property_report(bytes: &[u8]) -> ImportResult<Vec<UnitRecord>> {
    let grid = Grid::from_workbook_bytes(bytes)?;
    parse_property_grid(&grid)
}

/// 解析已物化的网格
pub fn parse_property_grid(grid: &Grid) -> ImportResult<Vec<UnitRecord>> {
    let header_index = find_property_report_header(grid).ok_or_else(|| {
        error!("物业报表表头行未找到");
        ImportError::HeaderNotFound("Unit / BD/BA".to_string())
    })?;

    let mut tracker = PropertyTracker::new();
    let mut units = Vec::new();

    for (offset, row) in grid.rows().skip(header_index + 1).enumerate() {
        if is_blank_row(row) {
            continue;
        }

        if is_property_group_row(row) {
            tracker.enter(cell_at(row, COL_UNIT).to_string());
            continue;
        }

        let Some(property) = tracker.current() else {
            continue;
        };

        let unit_cell = cell_at(row, COL_UNIT);
        if unit_cell.is_empty() {
            continue;
        }

        let unit = unit_cell.to_string().trim().to_string();
        if unit.is_empty() || is_units_subtotal(&unit, row) {
            continue;
        }

        let row_number = header_index + 1 + offset;
        units.push(map_row(property, unit, row, row_number)?);
    }

    info!(count = units.len(), "物业报表解析完成");
    Ok(units)
}

fn map_row(
    property: &str,
    unit: String,
    row: &[Cell],
    row_number: usize,
) -> ImportResult<UnitRecord> {
    // 金额列从 COL_TOTAL 起连续排列
    let amount =
        |idx: usize, field: &str| parse_amount(cell_at(row, COL_TOTAL + idx), row_number, field);

    Ok(UnitRecord {
        property: property.to_string(),
        unit,
        bd_ba: cell_at(row, COL_BD_BA).truthy_string(),
        status: cell_at(row, COL_STATUS).truthy_string(),
        sqft: parse_sqft(cell_at(row, COL_SQFT)),
        total: amount(0, "total")?,
        past_due: amount(1, "past_due")?,
        other_charges: amount(2, "other_charges")?,
        tenant_reimbursement_utilities: amount(3, "tenant_reimbursement_utilities")?,
        tenant_rental_income: amount(4, "tenant_rental_income")?,
        cha_affordable_housing_income: amount(5, "cha_affordable_housing_income")?,
        iha_affordable_housing_income: amount(6, "iha_affordable_housing_income")?,
        kckha_affordable_housing_income: amount(7, "kckha_affordable_housing_income")?,
        hakc_affordable_housing_income: amount(8, "hakc_affordable_housing_income")?,
        hud_affordable_housing_income: amount(9, "hud_affordable_housing_income")?,
        pet_rent: amount(10, "pet_rent")?,
        storage_fee: amount(11, "storage_fee")?,
        parking_fee: amount(12, "parking_fee")?,
        insurance_services: amount(13, "insurance_services")?,
        lease_from: cell_at(row, COL_LEASE_FROM).native_date(),
        lease_to: cell_at(row, COL_LEASE_TO).native_date(),
    })
}

/// 面积仅接受数值单元格（数字文本不转换），截断取整
fn parse_sqft(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(n) => Some(n.trunc() as i64),
        _ => None,
    }
}

/// 金额：空 → None（不是 0），数值原样，数字文本解析，其余报错
fn parse_amount(cell: &Cell, row: usize, field: &str) -> ImportResult<Option<f64>> {
    let conversion_error = |value: String| ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: format!("无法解析为浮点数: {}", value),
    };

    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| conversion_error(s.clone())),
        Cell::DateTime(_) => Err(conversion_error(cell.to_string())),
    }
}
