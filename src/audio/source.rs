/*
 * src/audio/source.rs
 * 音声ソースの種類と、再生するリソース (URL / 音声合成) の決定
 */

use clap::ValueEnum;

use crate::kana_data::SyllableEntry;

/// 音声合成の言語
pub const SPEECH_LANG: &str = "ja-JP";
/// 音声合成の話速 (1.0 が標準)
pub const SPEECH_RATE: f32 = 0.9;

/// 発音の取得元
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AudioSource {
    /// 有道 (おすすめ)
    Youdao,
    /// Riyutool (ローマ字キーの mp3)
    Riyutool,
    /// 音声合成エンジン
    Microsoft,
    /// Google 翻訳
    Google,
}

impl AudioSource {
    pub const ALL: [AudioSource; 4] = [
        AudioSource::Youdao,
        AudioSource::Riyutool,
        AudioSource::Microsoft,
        AudioSource::Google,
    ];

    /// 設定画面に出す名前
    pub fn label(self) -> &'static str {
        match self {
            AudioSource::Youdao => "有道 (Youdao) - Recommended",
            AudioSource::Riyutool => "Riyutool (Romanized)",
            AudioSource::Microsoft => "Speech Synthesis",
            AudioSource::Google => "Google Translate",
        }
    }

    /// かなと音声ソースから、実際に再生するものを決める
    pub fn resource_for(self, entry: &SyllableEntry) -> PlaybackResource {
        let url = match self {
            AudioSource::Youdao => {
                format!("https://dict.youdao.com/dictvoice?audio={}&le=jap", entry.kana)
            }
            AudioSource::Riyutool => {
                // Riyutool だけはローマ字キーでファイル名が決まる
                format!("https://riyutool.com/50yintuceshi/{}.mp3", entry.audio_key)
            }
            AudioSource::Google => format!(
                "https://translate.google.com/translate_tts?ie=UTF-8&client=tw-ob&q={}&tl=ja",
                entry.kana
            ),
            AudioSource::Microsoft => {
                return PlaybackResource::Speech {
                    text: entry.kana.to_string(),
                    lang: SPEECH_LANG,
                    rate: SPEECH_RATE,
                };
            }
        };
        PlaybackResource::Clip { url }
    }
}

/// 再生対象
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackResource {
    /// リモート (またはローカル) の音声クリップ
    Clip { url: String },
    /// 音声合成
    Speech {
        text: String,
        lang: &'static str,
        rate: f32,
    },
}
