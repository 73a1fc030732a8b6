// ==========================================
// 租赁报表邮件采集服务 - 领域模型层
// ==========================================
// 职责: 定义上报记录结构、上报载荷、报表类型
// 红线: 不含解析逻辑,不含网络 I/O
// ==========================================

pub mod inquiry;
pub mod payload;
pub mod types;
pub mod unit;

// 重导出核心类型
pub use inquiry::{Inquiry, ListingDetails};
pub use payload::{ParsedReport, UploadMetadata, UploadPayload};
pub use types::{iso_date, iso_timestamp, Endpoint, ReportKind};
pub use unit::UnitRecord;
