// ==========================================
// 租赁报表邮件采集服务 - 邮箱接口
// ==========================================
// 用途: 轮询循环所依赖的邮箱协作方
// 实现者: ImapMailbox（测试中使用内存替身）
// ==========================================

use crate::mailbox::error::MailResult;
use async_trait::async_trait;

#[async_trait]
pub trait Mailbox: Send {
    /// 建立连接并登录（已连接时先断开）
    async fn connect(&mut self) -> MailResult<()>;

    /// 断开连接，错误只记录不返回
    async fn disconnect(&mut self);

    /// 检索收件箱中的未读邮件
    ///
    /// # 参数
    /// - subject: 主题包含的子串；None 表示不过滤
    ///
    /// # 返回
    /// - 邮件 UID 列表（升序）
    async fn search_unseen(&mut self, subject: Option<&str>) -> MailResult<Vec<u32>>;

    /// 拉取整封邮件原文 (RFC 822)
    ///
    /// # 返回
    /// - Ok(None): 邮件已不存在
    async fn fetch_message(&mut self, uid: u32) -> MailResult<Option<Vec<u8>>>;

    /// 标记为已读
    async fn mark_seen(&mut self, uid: u32) -> MailResult<()>;
}
