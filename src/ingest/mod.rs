// ==========================================
// 租赁报表邮件采集服务 - 采集流程层
// ==========================================
// 职责: 附件路由 → 解析 → 上报; 邮箱轮询循环
// 流程: Poller → MailProcessor → (AttachmentRouter, ReportParser, Uploader)
// ==========================================

pub mod attachment_router;
pub mod mail_processor;
pub mod poller;
pub mod sample_upload;
pub mod uploader;

pub use attachment_router::{route_attachment, RouteDecision};
pub use mail_processor::{MailProcessor, ProcessOutcome};
pub use poller::{Poller, RECONNECT_DELAY};
pub use sample_upload::{upload_file, SampleOutcome};
pub use uploader::{HttpResponse, HttpTransport, ReqwestTransport, UploadError, Uploader};
