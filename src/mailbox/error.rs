// ==========================================
// 租赁报表邮件采集服务 - 邮箱错误类型
// ==========================================

use thiserror::Error;

/// 邮箱传输错误（触发断开-等待-重连）
#[derive(Error, Debug)]
pub enum MailError {
    #[error("邮箱连接失败: {0}")]
    ConnectError(String),

    #[error("TLS 握手失败: {0}")]
    TlsError(String),

    #[error("IMAP 登录失败: {0}")]
    LoginError(String),

    #[error("IMAP 命令失败: {0}")]
    ImapError(String),

    #[error("邮箱未连接")]
    NotConnected,
}

impl From<std::io::Error> for MailError {
    fn from(err: std::io::Error) -> Self {
        MailError::ConnectError(err.to_string())
    }
}

impl From<async_native_tls::Error> for MailError {
    fn from(err: async_native_tls::Error) -> Self {
        MailError::TlsError(err.to_string())
    }
}

impl From<async_imap::error::Error> for MailError {
    fn from(err: async_imap::error::Error) -> Self {
        MailError::ImapError(err.to_string())
    }
}

/// Result 类型别名
pub type MailResult<T> = Result<T, MailError>;
