// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

mod audio;
mod cli;
mod error;
mod home;
mod kana_data;
mod logging;
mod quiz;
mod stats;
mod tui;

use audio::AudioService;
use cli::Args;
use home::HomeAction;
use tui::{QuizExit, QuizScreen};

// --------------------------------------------------
// メイン関数
// --------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = logging::init()?;
    info!(log = %log_path.display(), "starting kanawiz");

    // 音声の再生はこのランタイムの上で走らせる
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let audio = Arc::new(AudioService::new(Arc::new(args.speaker()?)));

    let mut settings = args.settings();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // --mode 指定時は最初だけホーム画面を飛ばす
    let mut pending = args.mode.map(HomeAction::Start);

    loop {
        let action = match pending.take() {
            Some(action) => action,
            None => home::run_home(&mut settings, &audio, runtime.handle())?,
        };
        let HomeAction::Start(mode) = action else {
            break;
        };

        let session = quiz::build_session(&settings, mode, &mut rng);
        let screen = QuizScreen::new(
            session,
            settings,
            Arc::clone(&audio),
            runtime.handle().clone(),
            args.repeat,
        );

        let mut terminal = tui::setup_terminal()?;
        let exit = tui::run_quiz(&mut terminal, screen);
        tui::restore_terminal()?; // エラーでも必ず端末を戻してから返す

        match exit? {
            QuizExit::Finished(stats) => {
                info!(total = stats.total, correct = stats.correct, "quiz finished");
                home::print_summary(&stats);
            }
            QuizExit::Aborted => info!("quiz aborted"),
        }
    }

    audio.stop();
    info!("bye");
    Ok(())
}
