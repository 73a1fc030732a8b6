// ==========================================
// 租赁报表邮件采集服务 - IMAP 邮箱实现
// ==========================================
// 工具: async-imap + async-native-tls (tokio 运行时)
// 说明: 单个长连接跨轮询周期复用，出错时整体重建
// ==========================================

use crate::config::MailboxConfig;
use crate::mailbox::error::{MailError, MailResult};
use crate::mailbox::mailbox_trait::Mailbox;
use async_imap::Session;
use async_native_tls::{TlsConnector, TlsStream};
use async_trait::async_trait;
use futures::TryStreamExt;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

const INBOX: &str = "INBOX";

type ImapSession = Session<TlsStream<TcpStream>>;

pub struct ImapMailbox {
    config: MailboxConfig,
    session: Option<ImapSession>,
}

impl ImapMailbox {
    pub fn new(config: MailboxConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    fn session(&mut self) -> MailResult<&mut ImapSession> {
        self.session.as_mut().ok_or(MailError::NotConnected)
    }
}

/// IMAP SEARCH 查询
pub fn unseen_query(subject: Option<&str>) -> String {
    match subject {
        Some(s) if !s.is_empty() => {
            let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
            format!("SUBJECT \"{}\" UNSEEN", escaped)
        }
        _ => "UNSEEN".to_string(),
    }
}

#[async_trait]
impl Mailbox for ImapMailbox {
    async fn connect(&mut self) -> MailResult<()> {
        if self.session.is_some() {
            self.disconnect().await;
        }

        let host = self.config.host.as_str();
        let tcp = TcpStream::connect((host, self.config.port)).await?;
        let tls = TlsConnector::new().connect(host, tcp).await?;

        let client = async_imap::Client::new(tls);
        let session = client
            .login(&self.config.user, &self.config.password)
            .await
            .map_err(|(e, _)| MailError::LoginError(e.to_string()))?;

        info!(host = %self.config.host, port = self.config.port, "邮箱连接成功");
        self.session = Some(session);
        Ok(())
    }

    async fn disconnect(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Err(e) = session.close().await {
            debug!(error = %e, "关闭邮箱失败");
        }
        match session.logout().await {
            Ok(()) => info!("已断开邮箱连接"),
            Err(e) => debug!(error = %e, "登出失败"),
        }
    }

    async fn search_unseen(&mut self, subject: Option<&str>) -> MailResult<Vec<u32>> {
        let session = self.session()?;
        session.select(INBOX).await?;

        let query = unseen_query(subject);
        let mut uids: Vec<u32> = session.uid_search(&query).await?.into_iter().collect();
        uids.sort_unstable();

        debug!(query = %query, count = uids.len(), "未读邮件检索完成");
        Ok(uids)
    }

    async fn fetch_message(&mut self, uid: u32) -> MailResult<Option<Vec<u8>>> {
        let session = self.session()?;
        let fetches: Vec<_> = session
            .uid_fetch(uid.to_string(), "RFC822")
            .await?
            .try_collect()
            .await?;

        let body = fetches
            .iter()
            .find_map(|fetch| fetch.body().map(<[u8]>::to_vec));
        if body.is_none() {
            warn!(uid, "邮件正文为空");
        }
        Ok(body)
    }

    async fn mark_seen(&mut self, uid: u32) -> MailResult<()> {
        let session = self.session()?;
        let _: Vec<_> = session
            .uid_store(uid.to_string(), "+FLAGS (\\Seen)")
            .await?
            .try_collect()
            .await?;
        Ok(())
    }
}
