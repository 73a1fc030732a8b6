// ==========================================
// 租赁报表邮件采集服务 - 配置层
// ==========================================
// 职责: 启动时一次性读取并校验环境变量配置
// 来源: 进程环境变量 / .env 文件
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{config_keys, AppConfig, ConfigError, MailboxConfig, UploadConfig};
