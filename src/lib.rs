// ==========================================
// 租赁报表邮件采集服务 - 核心库
// ==========================================
// 技术栈: Rust + tokio + calamine + IMAP
// 系统定位: 轮询邮箱, 解析报表附件, 上报标准化记录
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与载荷
pub mod domain;

// 导入层 - 报表解析
pub mod importer;

// 采集层 - 路由/上报/轮询
pub mod ingest;

// 邮箱层 - IMAP
pub mod mailbox;

// 配置层 - 环境变量
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{AppConfig, ConfigError};
pub use domain::{Endpoint, Inquiry, ParsedReport, ReportKind, UnitRecord, UploadMetadata};
pub use importer::{ImportError, ImportResult};
pub use ingest::{MailProcessor, Poller, ProcessOutcome, ReqwestTransport, Uploader};
pub use mailbox::{ImapMailbox, Mailbox};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "租赁报表邮件采集服务";
