// ==========================================
// 租赁报表邮件采集服务 - 报表解析器接口
// ==========================================
// 职责: 统一三种报表解析器的调用入口
// 实现者: LeasingExcelParser, LeasingCsvParser, PropertyReportParser
// ==========================================

use crate::domain::payload::ParsedReport;
use crate::domain::types::ReportKind;
use crate::importer::error::ImportResult;
use crate::importer::leasing_csv::parse_leasing_csv;
use crate::importer::leasing_excel::parse_leasing_excel;
use crate::importer::property_report::parse_property_report;

// ==========================================
// ReportParser Trait
// ==========================================
pub trait ReportParser: Send + Sync {
    /// 解析附件字节为记录集合
    ///
    /// # 返回
    /// - Ok(ParsedReport): 记录集合（可能为空）
    /// - Err: 文件损坏、编码错误、表头缺失、类型转换失败
    fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedReport>;
}

pub struct LeasingExcelParser;

impl ReportParser for LeasingExcelParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedReport> {
        parse_leasing_excel(bytes).map(ParsedReport::Inquiries)
    }
}

pub struct LeasingCsvParser;

impl ReportParser for LeasingCsvParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedReport> {
        parse_leasing_csv(bytes).map(ParsedReport::Inquiries)
    }
}

pub struct PropertyReportParser;

impl ReportParser for PropertyReportParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<ParsedReport> {
        parse_property_report(bytes).map(ParsedReport::Units)
    }
}

/// 按报表类型选择解析器
pub fn parser_for(kind: ReportKind) -> Box<dyn ReportParser> {
    match kind {
        ReportKind::LeasingExcel => Box::new(LeasingExcelParser),
        ReportKind::LeasingCsv => Box::new(LeasingCsvParser),
        ReportKind::PropertyReport => Box::new(PropertyReportParser),
    }
}
