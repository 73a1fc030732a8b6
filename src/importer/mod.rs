// ==========================================
// 租赁报表邮件采集服务 - 导入层
// ==========================================
// 职责: 附件字节 → 网格 → 行分类 → 标准化记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod cell;
pub mod error;
pub mod grid;
pub mod leasing_csv;
pub mod leasing_excel;
pub mod property_report;
pub mod report_parser;
pub mod row_classifier;

// 重导出核心类型
pub use cell::Cell;
pub use error::{ImportError, ImportResult};
pub use grid::Grid;
pub use leasing_csv::parse_leasing_csv;
pub use leasing_excel::{parse_leasing_excel, parse_leasing_grid};
pub use property_report::{parse_property_grid, parse_property_report};
pub use row_classifier::PropertyTracker;

// 重导出 Trait 接口
pub use report_parser::{
    parser_for, LeasingCsvParser, LeasingExcelParser, PropertyReportParser, ReportParser,
};
