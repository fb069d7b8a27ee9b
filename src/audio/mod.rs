/*
 * src/audio/mod.rs
 * 発音の再生管理
 *
 * 新しい再生を始めると、それ以前の再生は必ず打ち切られる。
 * 再生ごとに play_id を振り、繰り返しの前と間の待ち時間で
 * 自分がまだ最新かどうかを確認する。
 * 音を出している間は output を握り、前の再生が止まりきるまで
 * 次の再生は鳴らさない。
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub mod command;
pub mod source;

pub use command::CommandSpeaker;
pub use source::{AudioSource, PlaybackResource};

use crate::error::AudioError;
use crate::kana_data::SyllableEntry;

/// 繰り返し再生の間の待ち時間
pub const REPEAT_PAUSE: Duration = Duration::from_millis(300);

/// 1回分の再生を行うもの (外部プレイヤー、テスト用のダミーなど)
#[async_trait]
pub trait Speaker: Send + Sync {
    /// 最後まで再生できたら Ok。
    /// `cancel` が発火したら出力を止めて `AudioError::Interrupted` を返す
    async fn play_once(
        &self,
        resource: &PlaybackResource,
        cancel: CancellationToken,
    ) -> Result<(), AudioError>;
}

/// play() の結果。呼び出し側にエラーは返さない
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// 指定回数すべて再生した
    Completed,
    /// 新しい再生か stop() に打ち切られた
    Abandoned,
    /// 読み込み失敗など (ログには残す)
    Failed,
}

/// 再生の管理役。アプリ全体で1つだけ作り、Arc で共有する
pub struct AudioService {
    speaker: Arc<dyn Speaker>,
    /// 最後に発行した play_id
    current_play_id: AtomicU64,
    /// 今の再生の中断用トークン
    current: Mutex<CancellationToken>,
    /// 音を出している再生が握る (重なり防止)
    output: tokio::sync::Mutex<()>,
    repeat_pause: Duration,
}

impl AudioService {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self {
            speaker,
            current_play_id: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
            output: tokio::sync::Mutex::new(()),
            repeat_pause: REPEAT_PAUSE,
        }
    }

    /// `entry` の発音を `times` 回再生する。
    /// 途中で別の play() が呼ばれたら黙って終わる
    pub async fn play(
        &self,
        entry: &SyllableEntry,
        source: AudioSource,
        times: u32,
    ) -> PlaybackOutcome {
        let (play_id, cancel) = self.begin();
        let resource = source.resource_for(entry);
        debug!(play_id, kana = entry.kana, ?source, times, "playback issued");

        match self.run(play_id, &resource, &cancel, times).await {
            Ok(true) => {
                debug!(play_id, "playback completed");
                PlaybackOutcome::Completed
            }
            Ok(false) => {
                debug!(play_id, "playback superseded");
                PlaybackOutcome::Abandoned
            }
            Err(e) if e.is_interruption() => {
                debug!(play_id, "playback interrupted");
                PlaybackOutcome::Abandoned
            }
            Err(e) => {
                warn!(play_id, kana = entry.kana, ?source, error = %e, "audio playback failed");
                PlaybackOutcome::Failed
            }
        }
    }

    /// 再生中の音を止める (何も再生していなくても呼んでよい)
    pub fn stop(&self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
    }

    /// 新しい play_id を発行し、前の再生を止める
    fn begin(&self) -> (u64, CancellationToken) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let play_id = self.current_play_id.fetch_add(1, Ordering::SeqCst) + 1;
        current.cancel();
        *current = CancellationToken::new();
        (play_id, current.clone())
    }

    fn is_current(&self, play_id: u64) -> bool {
        self.current_play_id.load(Ordering::SeqCst) == play_id
    }

    /// Ok(false) は途中で新しい再生に追い越されたとき
    async fn run(
        &self,
        play_id: u64,
        resource: &PlaybackResource,
        cancel: &CancellationToken,
        times: u32,
    ) -> Result<bool, AudioError> {
        for i in 0..times {
            if !self.is_current(play_id) {
                return Ok(false);
            }

            {
                // 前の再生の speaker が戻る (プロセスが片付く) まで待つ
                let _output = self.output.lock().await;
                if !self.is_current(play_id) {
                    return Ok(false);
                }
                self.speaker.play_once(resource, cancel.clone()).await?;
            }

            if i + 1 < times {
                if !self.is_current(play_id) {
                    return Ok(false);
                }
                tokio::select! {
                    _ = tokio::time::sleep(self.repeat_pause) => {}
                    _ = cancel.cancelled() => return Err(AudioError::Interrupted),
                }
            }
        }
        Ok(true)
    }
}
