// ============================================
// src/error.rs
// 音声再生まわりのエラー型
// ============================================

use thiserror::Error;

/// 1回分の再生 (play_once) で起きるエラー
#[derive(Error, Debug)]
pub enum AudioError {
    /// 新しい再生、または stop() によって中断された (エラー扱いしない)
    #[error("playback interrupted")]
    Interrupted,

    /// 再生コマンドを起動できなかった
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// 再生コマンドが異常終了した (読み込み失敗など)
    #[error("`{program}` failed: {status}")]
    PlayerFailed { program: String, status: String },
}

impl AudioError {
    /// 中断による終了かどうか
    pub fn is_interruption(&self) -> bool {
        matches!(self, AudioError::Interrupted)
    }
}
