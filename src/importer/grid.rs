// ==========================================
// 租赁报表邮件采集服务 - 工作表网格读取
// ==========================================
// 支持: Excel (.xlsx/.xls) / ODS, 从内存字节读取
// 说明: 行列索引与工作表绝对位置一致（前导空行/空列补齐）,
//       固定偏移量才能对应模板中的真实行号
// ==========================================

use crate::importer::cell::Cell;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use tracing::debug;

static EMPTY_CELL: Cell = Cell::Empty;

/// 按行存放的矩形单元格网格
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// 由行数据构造（短行补齐为矩形）
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, Cell::Empty);
        }
        Self { rows }
    }

    /// 从工作簿字节读取第一个工作表
    pub fn from_workbook_bytes(bytes: &[u8]) -> ImportResult<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))??;

        let grid = Self::from_range(&range);
        debug!(rows = grid.height(), cols = grid.width(), "工作表读取完成");
        Ok(grid)
    }

    fn from_range(range: &Range<Data>) -> Self {
        let (end_row, end_col) = match range.end() {
            Some(end) => end,
            None => return Self::default(),
        };

        let rows = (0..=end_row)
            .map(|r| {
                (0..=end_col)
                    .map(|c| range.get_value((r, c)).map(Cell::from).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// 越界访问返回空单元格
pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_to_rectangle() {
        let grid = Grid::from_rows(vec![
            vec![Cell::text("a")],
            vec![Cell::text("b"), Cell::Number(1.0), Cell::Empty],
        ]);

        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        let first: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(first[0].len(), 3);
        assert_eq!(first[0][2], Cell::Empty);
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let row = vec![Cell::text("only")];
        assert_eq!(cell_at(&row, 0), &Cell::text("only"));
        assert_eq!(cell_at(&row, 14), &Cell::Empty);
    }

    #[test]
    fn test_invalid_workbook_bytes() {
        let result = Grid::from_workbook_bytes(b"not a workbook");
        assert!(result.is_err());
    }
}
