// ==========================================
// 本地样例报表上传工具（不经过邮箱）
//
// Usage:
//   cargo run --bin upload_samples -- [file ...]
//
// 未指定文件时上传 sample-csvs/ 下的默认样例；文件名决定解析器与上报端点。

use rental_report_ingest::config::UploadConfig;
use rental_report_ingest::ingest::{upload_file, ReqwestTransport, Uploader};
use rental_report_ingest::logging;
use std::path::{Path, PathBuf};

const SAMPLES_DIR: &str = "sample-csvs";
const DEFAULT_SAMPLES: [&str; 2] = [
    "guest_card_inquiries-20260127.xlsx",
    "rent_roll_itemized-20260127.xlsx",
];

fn sample_paths() -> Vec<PathBuf> {
    let args: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if !args.is_empty() {
        return args;
    }
    DEFAULT_SAMPLES
        .iter()
        .map(|name| Path::new(SAMPLES_DIR).join(name))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = UploadConfig::from_env()?;
    let uploader = Uploader::new(
        config.api_base_url.clone(),
        config.request_timeout,
        ReqwestTransport::new()?,
    );

    for path in sample_paths() {
        println!("{}", upload_file(&uploader, &path).await);
    }

    Ok(())
}
