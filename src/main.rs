// ==========================================
// 租赁报表邮件采集服务 - 主入口
// ==========================================

use anyhow::Context;
use rental_report_ingest::config::AppConfig;
use rental_report_ingest::ingest::{MailProcessor, Poller, ReqwestTransport, Uploader};
use rental_report_ingest::logging;
use rental_report_ingest::mailbox::ImapMailbox;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", rental_report_ingest::APP_NAME);
    tracing::info!("系统版本: {}", rental_report_ingest::VERSION);
    tracing::info!("==================================================");

    // 启动前校验配置，缺失即退出
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "配置校验失败");
        e
    })?;
    tracing::info!(api_url = %config.upload.api_base_url, "API 地址");

    let transport = ReqwestTransport::new().context("HTTP 客户端初始化失败")?;
    let uploader = Uploader::new(
        config.upload.api_base_url.clone(),
        config.upload.request_timeout,
        transport,
    );
    let processor = MailProcessor::new(uploader);
    let mailbox = ImapMailbox::new(config.mailbox.clone());

    let mut poller = Poller::new(&config, mailbox, processor);
    poller.run().await?;

    tracing::info!("邮件采集服务已退出");
    Ok(())
}
