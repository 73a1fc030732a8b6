// ==========================================
// 租赁报表邮件采集服务 - 邮箱轮询循环
// ==========================================
// 循环: 检查收件箱 → 休眠固定间隔
// 故障: 周期内任何邮箱错误 → 断开 → 等待 RECONNECT_DELAY → 重连，本周期放弃
// 去重: 已处理 UID 集合仅在内存中，重启后遗忘（依赖"标记已读"兜底）
// ==========================================

use crate::config::AppConfig;
use crate::ingest::mail_processor::{MailProcessor, ProcessOutcome};
use crate::ingest::uploader::HttpTransport;
use crate::mailbox::{MailError, MailResult, Mailbox};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

/// 邮箱错误后的重连等待
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct Poller<M: Mailbox, T: HttpTransport> {
    mailbox: M,
    processor: MailProcessor<T>,
    poll_interval: Duration,
    reconnect_delay: Duration,
    search_subject: Option<String>,
    processed_uids: HashSet<u32>,
}

impl<M: Mailbox, T: HttpTransport> Poller<M, T> {
    pub fn new(config: &AppConfig, mailbox: M, processor: MailProcessor<T>) -> Self {
        Self {
            mailbox,
            processor,
            poll_interval: config.poll_interval,
            reconnect_delay: RECONNECT_DELAY,
            search_subject: config.search_subject.clone(),
            processed_uids: HashSet::new(),
        }
    }

    /// 覆写重连等待时间
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn mailbox(&self) -> &M {
        &self.mailbox
    }

    pub fn processor(&self) -> &MailProcessor<T> {
        &self.processor
    }

    pub fn processed_uids(&self) -> &HashSet<u32> {
        &self.processed_uids
    }

    /// 运行直到 Ctrl-C
    pub async fn run(&mut self) -> MailResult<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "无法监听退出信号");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// 运行直到 shutdown 完成
    ///
    /// # 返回
    /// - Err: 首次连接失败（进程应退出）
    pub async fn run_until<F>(&mut self, shutdown: F) -> MailResult<()>
    where
        F: Future<Output = ()>,
    {
        info!(interval_secs = self.poll_interval.as_secs(), "启动邮件采集服务");

        if let Err(e) = self.mailbox.connect().await {
            error!(error = %e, "邮箱连接失败, 退出");
            return Err(e);
        }

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("正在关闭邮件采集服务...");
                    break;
                }
                _ = self.cycle() => {}
            }
        }

        self.mailbox.disconnect().await;
        Ok(())
    }

    async fn cycle(&mut self) {
        self.poll_once().await;
        debug!(secs = self.poll_interval.as_secs(), "休眠");
        tokio::time::sleep(self.poll_interval).await;
    }

    /// 执行一次检查；邮箱错误时断开并重连
    pub async fn poll_once(&mut self) {
        if let Err(e) = self.check_inbox().await {
            error!(error = %e, "检查收件箱失败");
            self.reconnect().await;
        }
    }

    async fn reconnect(&mut self) {
        self.mailbox.disconnect().await;
        tokio::time::sleep(self.reconnect_delay).await;
        if let Err(e) = self.mailbox.connect().await {
            error!(error = %e, "邮箱重连失败");
        }
    }

    /// 检查未读邮件并逐封处理
    ///
    /// # 返回
    /// - Ok(n): 本轮成功处理并标记已读的邮件数
    /// - Err: 邮箱传输错误
    pub async fn check_inbox(&mut self) -> Result<usize, MailError> {
        let uids = self
            .mailbox
            .search_unseen(self.search_subject.as_deref())
            .await?;

        if uids.is_empty() {
            debug!("没有新邮件");
            return Ok(0);
        }
        info!(count = uids.len(), "发现未读邮件");

        let mut handled = 0;
        for uid in uids {
            if self.processed_uids.contains(&uid) {
                continue;
            }

            let Some(raw) = self.mailbox.fetch_message(uid).await? else {
                continue;
            };

            if self.processor.process_message(&raw).await == ProcessOutcome::Handled {
                self.processed_uids.insert(uid);
                self.mailbox.mark_seen(uid).await?;
                handled += 1;
            }
        }

        Ok(handled)
    }
}
