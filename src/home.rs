// ============================================
// src/home.rs
// ホーム画面 (設定メニュー) とリザルト表示
// ============================================

use std::sync::Arc;

use anyhow::Result;
use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use tokio::runtime::Handle;
use tracing::info;

use crate::audio::{AudioService, AudioSource};
use crate::kana_data::{KANA_LIST, Script, find_by_id};
use crate::quiz::{CategoryFilter, QuizMode, QuizSettings, ScriptFilter};
use crate::stats::ScoreTally;

/// リザルト画面に出すミスの件数
const TOP_MISSES: usize = 10;

/// ホーム画面で選ばれたこと
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HomeAction {
    Start(QuizMode),
    Quit,
}

/// メニューの並び
const MENU_LISTEN: usize = 0;
const MENU_READ: usize = 1;
const MENU_SETTINGS: usize = 2;
const MENU_TEST_AUDIO: usize = 3;

/// ホーム画面。クイズ開始か終了が選ばれるまで戻らない
pub fn run_home(
    settings: &mut QuizSettings,
    audio: &Arc<AudioService>,
    runtime: &Handle,
) -> Result<HomeAction> {
    let theme = ColorfulTheme::default();

    loop {
        println!();
        println!("{}", style("🌸 KANA WiZ  五十音を マスターしよう").magenta().bold());
        println!("{}", style(describe(settings)).dim());

        let items = [
            QuizMode::Listen.label(),
            QuizMode::Read.label(),
            "設定 (Settings)",
            "音声テスト (Test Audio)",
            "終了 (Quit)",
        ];
        let choice = Select::with_theme(&theme)
            .with_prompt("メニュー")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(MENU_LISTEN) => return Ok(HomeAction::Start(QuizMode::Listen)),
            Some(MENU_READ) => return Ok(HomeAction::Start(QuizMode::Read)),
            Some(MENU_SETTINGS) => edit_settings(settings, &theme)?,
            Some(MENU_TEST_AUDIO) => test_audio(settings.audio_source, audio, runtime),
            _ => return Ok(HomeAction::Quit),
        }
    }
}

/// 現在の設定を1行で
pub fn describe(settings: &QuizSettings) -> String {
    format!(
        "{} 問 / {} / {} / {}",
        settings.question_count,
        settings.script.label(),
        settings.category.label(),
        settings.audio_source.label()
    )
}

fn edit_settings(settings: &mut QuizSettings, theme: &ColorfulTheme) -> Result<()> {
    // 音声ソース
    let labels: Vec<&str> = AudioSource::ALL.iter().map(|s| s.label()).collect();
    if let Some(i) = Select::with_theme(theme)
        .with_prompt("音声ソース (Audio Source)")
        .items(&labels)
        .default(position(&AudioSource::ALL, &settings.audio_source))
        .interact_opt()?
    {
        settings.audio_source = AudioSource::ALL[i];
    }

    // 問題数
    let counts: Vec<usize> = QuizSettings::question_count_choices().collect();
    let labels: Vec<String> = counts.iter().map(|n| format!("{n} 問")).collect();
    if let Some(i) = Select::with_theme(theme)
        .with_prompt("問題数 (Count)")
        .items(&labels)
        .default(position(&counts, &settings.question_count))
        .max_length(8)
        .interact_opt()?
    {
        settings.question_count = counts[i];
    }

    // 文字
    let labels: Vec<&str> = ScriptFilter::ALL.iter().map(|s| s.label()).collect();
    if let Some(i) = Select::with_theme(theme)
        .with_prompt("文字 (Script)")
        .items(&labels)
        .default(position(&ScriptFilter::ALL, &settings.script))
        .interact_opt()?
    {
        settings.script = ScriptFilter::ALL[i];
    }

    // 種類
    let labels: Vec<&str> = CategoryFilter::ALL.iter().map(|c| c.label()).collect();
    if let Some(i) = Select::with_theme(theme)
        .with_prompt("種類 (Category)")
        .items(&labels)
        .default(position(&CategoryFilter::ALL, &settings.category))
        .interact_opt()?
    {
        settings.category = CategoryFilter::ALL[i];
    }

    info!(settings = %describe(settings), "settings changed");
    Ok(())
}

fn position<T: PartialEq>(items: &[T], current: &T) -> usize {
    items.iter().position(|item| item == current).unwrap_or(0)
}

/// 「あ」を2回流す
fn test_audio(source: AudioSource, audio: &Arc<AudioService>, runtime: &Handle) {
    let Some(sample) = KANA_LIST
        .iter()
        .find(|k| k.romaji == "a" && k.script == Script::Hiragana)
    else {
        return;
    };
    let audio = Arc::clone(audio);
    runtime.spawn(async move {
        audio.play(sample, source, 2).await;
    });
}

/// リザルト画面の本文
pub fn summary_lines(stats: &ScoreTally) -> Vec<String> {
    let mut lines = vec![format!(
        "正解 {} / {}  ({}%)",
        stats.correct,
        stats.total,
        stats.accuracy_percent()
    )];

    let misses = stats.top_misses(TOP_MISSES);
    if !misses.is_empty() {
        lines.push("よく間違えた文字:".to_string());
        for (rank, (id, count)) in misses.iter().enumerate() {
            let name = match find_by_id(id) {
                Some(k) => format!("{} ({})", k.kana, k.romaji),
                None => id.to_string(),
            };
            lines.push(format!("  {:>2}. {name}  × {count}", rank + 1));
        }
    }
    lines
}

pub fn print_summary(stats: &ScoreTally) {
    println!();
    println!("{}", style("結果 (Result)").yellow().bold());
    for (i, line) in summary_lines(stats).iter().enumerate() {
        if i == 0 {
            println!("{}", style(line).green());
        } else {
            println!("{line}");
        }
    }
}
