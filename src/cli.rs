// ============================================
// src/cli.rs
// コマンドライン引数 (起動時の設定)
// ============================================

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use crate::audio::command::{CommandLine, DEFAULT_PLAYER, DEFAULT_TTS};
use crate::audio::{AudioSource, CommandSpeaker};
use crate::quiz::{CategoryFilter, MIN_QUESTIONS, QuizMode, QuizSettings, ScriptFilter};

/// 起動するたびの自動再生回数 (Listen モード)
pub const DEFAULT_REPEAT: u32 = 2;

#[derive(Parser, Debug)]
#[command(name = "kanawiz")]
#[command(about = "KANA WiZ - 五十音の聞き取り・読み取り練習")]
#[command(version)]
pub struct Args {
    /// 問題数 (20〜200、10刻み)
    #[arg(short = 'n', long, default_value_t = MIN_QUESTIONS)]
    pub count: usize,

    /// 出題する文字
    #[arg(long, value_enum, default_value_t = ScriptFilter::Hiragana)]
    pub script: ScriptFilter,

    /// 出題する音の種類
    #[arg(long, value_enum, default_value_t = CategoryFilter::All)]
    pub category: CategoryFilter,

    /// 音声ソース
    #[arg(long, value_enum, default_value_t = AudioSource::Youdao)]
    pub source: AudioSource,

    /// 指定するとホーム画面を飛ばしてすぐに始める
    #[arg(long, value_enum)]
    pub mode: Option<QuizMode>,

    /// 新しい問題で発音を何回流すか
    #[arg(long, default_value_t = DEFAULT_REPEAT)]
    pub repeat: u32,

    /// 乱数のシード (同じ問題順を再現したいとき)
    #[arg(long)]
    pub seed: Option<u64>,

    /// 音声クリップの再生コマンド (URL が最後の引数になる)
    #[arg(long, env = "KANAWIZ_PLAYER", default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// 音声合成コマンド
    #[arg(long, env = "KANAWIZ_TTS", default_value = DEFAULT_TTS)]
    pub tts: String,
}

impl Args {
    /// 引数からクイズの初期設定を作る
    pub fn settings(&self) -> QuizSettings {
        let question_count = QuizSettings::clamp_count(self.count);
        if question_count != self.count {
            warn!(requested = self.count, question_count, "question count adjusted");
        }
        QuizSettings {
            question_count,
            script: self.script,
            category: self.category,
            audio_source: self.source,
        }
    }

    pub fn speaker(&self) -> Result<CommandSpeaker> {
        let player = CommandLine::parse(&self.player).context("--player must not be empty")?;
        let tts = CommandLine::parse(&self.tts).context("--tts must not be empty")?;
        Ok(CommandSpeaker::new(player, tts))
    }
}
