// ==========================================
// 租赁报表邮件采集服务 - 单封邮件处理
// ==========================================
// 流程: 解码邮件 → 遍历附件 → 路由 → 解析 → 上报
// 规则: 首个"解析成功且上报成功"的附件即视为该邮件已处理，
//       其余附件本次不再处理
// ==========================================

use crate::domain::payload::UploadMetadata;
use crate::domain::types::{iso_timestamp, ReportKind};
use crate::importer::report_parser::parser_for;
use crate::ingest::attachment_router::{route_attachment, RouteDecision};
use crate::ingest::uploader::{HttpTransport, Uploader};
use chrono::Local;
use mail_parser::{HeaderName, MessageParser, MimeHeaders, PartType};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// 邮件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// 有附件成功上报，可标记已读
    Handled,
    /// 无可用附件或全部失败，保持未读以便下轮重试
    NotHandled,
}

/// 邮件中的一个带文件名附件
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub contents: Vec<u8>,
}

/// 解码后的邮件
#[derive(Debug, Clone, Default)]
pub struct DecodedEmail {
    pub subject: Option<String>,
    pub date: Option<String>, // 原始 Date 头
    pub attachments: Vec<Attachment>,
}

/// 解码 RFC 822 原文；无法识别时返回 None
pub fn decode_email(raw: &[u8]) -> Option<DecodedEmail> {
    let message = MessageParser::default().parse(raw)?;

    let attachments = message
        .parts
        .iter()
        .filter(|part| !matches!(part.body, PartType::Multipart(_)))
        .filter_map(|part| {
            part.attachment_name().map(|name| Attachment {
                filename: name.to_string(),
                contents: part.contents().to_vec(),
            })
        })
        .collect();

    Some(DecodedEmail {
        subject: message.subject().map(str::to_string),
        // 原样透传 Date 头，不做解析重排
        date: message.header_raw(HeaderName::Date).map(|v| v.trim().to_string()),
        attachments,
    })
}

pub struct MailProcessor<T: HttpTransport> {
    uploader: Uploader<T>,
}

impl<T: HttpTransport> MailProcessor<T> {
    pub fn new(uploader: Uploader<T>) -> Self {
        Self { uploader }
    }

    pub fn uploader(&self) -> &Uploader<T> {
        &self.uploader
    }

    /// 处理一封邮件原文
    #[instrument(skip(self, raw), fields(size = raw.len()))]
    pub async fn process_message(&self, raw: &[u8]) -> ProcessOutcome {
        let Some(email) = decode_email(raw) else {
            warn!("邮件无法解码");
            return ProcessOutcome::NotHandled;
        };

        info!(subject = ?email.subject, attachments = email.attachments.len(), "处理邮件");
        self.process_email(&email).await
    }

    /// 处理已解码的邮件
    pub async fn process_email(&self, email: &DecodedEmail) -> ProcessOutcome {
        for attachment in &email.attachments {
            let kind = match route_attachment(&attachment.filename) {
                RouteDecision::NotSpreadsheet => continue,
                RouteDecision::Unrecognized => {
                    error!(filename = %attachment.filename, "未知报表类型");
                    continue;
                }
                RouteDecision::Report(kind) => kind,
            };

            info!(filename = %attachment.filename, kind = %kind, "发现报表附件");
            let metadata = UploadMetadata {
                filename: attachment.filename.clone(),
                email_subject: email.subject.clone(),
                email_date: email.date.clone(),
                received_at: iso_timestamp(&Local::now().naive_local()),
            };

            if self
                .process_attachment(kind, &attachment.contents, &metadata)
                .await
            {
                info!(filename = %attachment.filename, "附件处理成功");
                return ProcessOutcome::Handled;
            }
        }

        ProcessOutcome::NotHandled
    }

    /// 解析并上报单个附件
    ///
    /// # 返回
    /// - true: 解析出记录且上报成功
    /// - false: 解析失败、无记录或上报失败（均已记录日志）
    #[instrument(skip(self, contents, metadata), fields(batch_id, filename = %metadata.filename))]
    pub async fn process_attachment(
        &self,
        kind: ReportKind,
        contents: &[u8],
        metadata: &UploadMetadata,
    ) -> bool {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let records = match parser_for(kind).parse(contents) {
            Ok(records) if records.is_empty() => {
                error!(kind = %kind, "附件未解析到任何记录");
                return false;
            }
            Ok(records) => records,
            Err(e) => {
                error!(kind = %kind, error = %e, "附件解析失败");
                return false;
            }
        };

        match self.uploader.send(kind.endpoint(), &records, metadata).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, count = records.len(), "附件数据上报失败");
                false
            }
        }
    }
}
