// ==========================================
// 租赁报表邮件采集服务 - 应用配置
// ==========================================
// 职责: 配置加载、默认值、必填项校验
// 红线: 校验只在构造时做一次，运行期组件只接收已校验的配置
// ==========================================

use std::time::Duration;
use thiserror::Error;

/// 配置键
pub mod config_keys {
    pub const EMAIL_HOST: &str = "EMAIL_HOST";
    pub const EMAIL_PORT: &str = "EMAIL_PORT";
    pub const EMAIL_USER: &str = "EMAIL_USER";
    pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
    pub const API_URL: &str = "API_URL";
    pub const CHECK_INTERVAL: &str = "CHECK_INTERVAL";
    pub const SEARCH_SUBJECT: &str = "SEARCH_SUBJECT";
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}

// ===== 默认值 =====
const DEFAULT_EMAIL_HOST: &str = "imap.gmail.com";
const DEFAULT_EMAIL_PORT: u16 = 993;
const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;
const DEFAULT_SEARCH_SUBJECT: &str = "Guest Card Inquiries";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 配置错误（启动即失败）
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("缺少必填配置: {0}")]
    Missing(&'static str),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// 邮箱连接配置
#[derive(Clone, PartialEq, Eq)]
pub struct MailboxConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

// 密码不进日志
impl std::fmt::Debug for MailboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailboxConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// 上报接口配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub api_base_url: String,     // 不含结尾 '/'
    pub request_timeout: Duration, // 上报请求超时
}

impl UploadConfig {
    /// 从进程环境变量读取（样例上传工具只需要这一部分）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let api_base_url = get(config_keys::API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            return Err(ConfigError::Missing(config_keys::API_URL));
        }

        let timeout_secs = parse_or_default(
            get(config_keys::REQUEST_TIMEOUT_SECS),
            config_keys::REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mailbox: MailboxConfig,
    pub upload: UploadConfig,
    pub poll_interval: Duration,        // 轮询间隔
    pub search_subject: Option<String>, // None: 不按主题过滤
}

impl AppConfig {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取
    ///
    /// # 参数
    /// - lookup: 键 → 值（None 表示未设置）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let user = get(config_keys::EMAIL_USER)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(config_keys::EMAIL_USER))?;
        let password = get(config_keys::EMAIL_PASSWORD)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(config_keys::EMAIL_PASSWORD))?;

        let upload = UploadConfig::from_lookup(&lookup)?;

        let host = get(config_keys::EMAIL_HOST)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_EMAIL_HOST.to_string());

        let port = parse_or_default(
            get(config_keys::EMAIL_PORT),
            config_keys::EMAIL_PORT,
            DEFAULT_EMAIL_PORT,
        )?;
        let interval_secs = parse_or_default(
            get(config_keys::CHECK_INTERVAL),
            config_keys::CHECK_INTERVAL,
            DEFAULT_CHECK_INTERVAL_SECS,
        )?;

        // 显式设置为空串表示不按主题过滤
        let search_subject = match get(config_keys::SEARCH_SUBJECT) {
            None => Some(DEFAULT_SEARCH_SUBJECT.to_string()),
            Some(v) if v.is_empty() => None,
            Some(v) => Some(v),
        };

        Ok(Self {
            mailbox: MailboxConfig {
                host,
                port,
                user,
                password,
            },
            upload,
            poll_interval: Duration::from_secs(interval_secs),
            search_subject,
        })
    }
}

fn parse_or_default<T>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            message: e.to_string(),
            value: v,
        }),
    }
}
