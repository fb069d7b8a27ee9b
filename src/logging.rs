// ============================================
// src/logging.rs
// ログ出力の初期化 (画面を崩さないようファイルに書く)
// ============================================

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

const LOG_FILE: &str = "kanawiz.log";
const DEFAULT_FILTER: &str = "kanawiz=info";

// MARK:ログファイルのパスを取得する関数
pub fn log_file_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "KANA_WIZ") {
        let data_dir = proj_dirs.data_local_dir();
        if fs::create_dir_all(data_dir).is_ok() {
            return data_dir.join(LOG_FILE);
        }
    }

    // 取得できなかったらカレントディレクトリに
    PathBuf::from(LOG_FILE)
}

/// tracing を初期化する。`KANAWIZ_LOG` でフィルタを上書きできる
pub fn init() -> Result<PathBuf> {
    let path = log_file_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("KANAWIZ_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(path)
}
