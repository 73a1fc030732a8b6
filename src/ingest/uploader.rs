// ==========================================
// 租赁报表邮件采集服务 - 上报器
// ==========================================
// 职责: 序列化 {records, metadata} 并 POST 到 <base-url>/<endpoint>
// 规则: 仅 HTTP 200 视为成功; 本层不重试
// ==========================================

use crate::domain::payload::{ParsedReport, UploadMetadata, UploadPayload};
use crate::domain::types::Endpoint;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// 上报错误
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("HTTP 请求失败: {0}")]
    Transport(String),

    #[error("接口返回错误: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("请求体序列化失败: {0}")]
    Serialize(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::Serialize(err.to_string())
    }
}

/// HTTP 响应（状态码 + 文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

// ==========================================
// HttpTransport Trait
// ==========================================
// 实现者: ReqwestTransport（测试中使用记录型替身）
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST JSON 请求体
    ///
    /// # 返回
    /// - Ok(HttpResponse): 收到任意状态码的响应
    /// - Err: 连接失败、超时等传输错误
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, UploadError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rental-report-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, UploadError> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

// ==========================================
// Uploader - 上报器
// ==========================================
pub struct Uploader<T: HttpTransport> {
    base_url: String,
    timeout: Duration,
    transport: T,
}

impl<T: HttpTransport> Uploader<T> {
    /// 创建上报器
    ///
    /// # 参数
    /// - base_url: API 基地址（结尾 '/' 会被去掉）
    /// - timeout: 单次请求超时
    /// - transport: HTTP 传输实现
    pub fn new(base_url: impl Into<String>, timeout: Duration, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            transport,
        }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 上报一个附件的解析结果
    pub async fn send(
        &self,
        endpoint: Endpoint,
        records: &ParsedReport,
        metadata: &UploadMetadata,
    ) -> Result<(), UploadError> {
        let url = self.endpoint_url(endpoint);
        let body = serde_json::to_value(UploadPayload { records, metadata })?;

        let response = self
            .transport
            .post_json(&url, &body, self.timeout)
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "上报请求失败");
                e
            })?;

        if response.status == 200 {
            info!(url = %url, count = records.len(), "上报成功");
            Ok(())
        } else {
            error!(url = %url, status = response.status, body = %response.body, "接口返回错误");
            Err(UploadError::Status {
                status: response.status,
                body: response.body,
            })
        }
    }
}
