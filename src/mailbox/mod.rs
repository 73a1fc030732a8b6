// ==========================================
// 租赁报表邮件采集服务 - 邮箱层
// ==========================================
// 职责: 未读邮件检索、整封拉取、标记已读
// 实现: IMAP over TLS
// ==========================================

pub mod error;
pub mod imap_mailbox;
pub mod mailbox_trait;

pub use error::{MailError, MailResult};
pub use imap_mailbox::ImapMailbox;
pub use mailbox_trait::Mailbox;
