// ============================================
// src/tui.rs
// クイズ画面 (TUIセットアップと実行ループ、描画)
// ============================================

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use tokio::runtime::Handle;
use tracing::debug;

use crate::audio::AudioService;
use crate::kana_data::SyllableEntry;
use crate::quiz::{Advance, QuizMode, QuizSession, QuizSettings, Selection};
use crate::stats::ScoreTally;

/// クイズ画面の終わり方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizExit {
    /// 最後まで解いた
    Finished(ScoreTally),
    /// Esc でホームに戻った
    Aborted,
}

/// クイズ画面の状態
pub struct QuizScreen {
    session: QuizSession,
    settings: QuizSettings,
    audio: Arc<AudioService>,
    runtime: Handle,
    /// 新しい問題で発音を流す回数
    repeat: u32,
}

impl QuizScreen {
    pub fn new(
        session: QuizSession,
        settings: QuizSettings,
        audio: Arc<AudioService>,
        runtime: Handle,
        repeat: u32,
    ) -> Self {
        Self {
            session,
            settings,
            audio,
            runtime,
            repeat,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// 再生は裏で走らせ、画面は止めない
    fn play(&self, entry: &'static SyllableEntry, times: u32) {
        let audio = Arc::clone(&self.audio);
        let source = self.settings.audio_source;
        self.runtime.spawn(async move {
            audio.play(entry, source, times).await;
        });
    }

    /// 新しい問題が表示されたとき (Listen モードは自動再生)。
    /// Read モードは選択肢が音なので、正解の音を先に流すと答えが分かってしまう
    pub fn on_question_shown(&self) {
        if self.session.mode() != QuizMode::Listen || self.session.is_answered() {
            return;
        }
        if let Some(question) = self.session.current() {
            self.play(question.target, self.repeat);
        }
    }

    /// キー入力の処理。画面を閉じるときは Some を返す
    pub fn handle_key(&mut self, code: KeyCode) -> Option<QuizExit> {
        match code {
            KeyCode::Esc => {
                self.audio.stop();
                return Some(QuizExit::Aborted);
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                match self.session.select(index) {
                    Selection::Answered { correct } => debug!(correct, "answered"),
                    // Read モードは選んだ音を1回流す
                    Selection::Marked => {
                        if let Some(option) = self.selected_option() {
                            self.play(option, 1);
                        }
                    }
                    Selection::Ignored => {}
                }
            }
            KeyCode::Char(' ') => self.replay(),
            KeyCode::Enter => {
                if !self.session.is_answered() {
                    if self.session.mode() == QuizMode::Read {
                        self.session.confirm();
                    }
                    return None;
                }
                match self.session.advance() {
                    Advance::Next => {
                        // 前の問題の音を次の問題に持ち越さない
                        self.audio.stop();
                        self.on_question_shown();
                    }
                    Advance::Finished => {
                        self.audio.stop();
                        return Some(QuizExit::Finished(self.session.stats().clone()));
                    }
                    Advance::NotAnswered => {}
                }
            }
            _ => {}
        }
        None
    }

    fn selected_option(&self) -> Option<&'static SyllableEntry> {
        let question = self.session.current()?;
        question.options.get(self.session.selected()?).copied()
    }

    /// もう一度聞く
    fn replay(&self) {
        let entry = match self.session.mode() {
            QuizMode::Listen => self.session.current().map(|q| q.target),
            QuizMode::Read => self.selected_option(),
        };
        if let Some(entry) = entry {
            self.play(entry, 1);
        }
    }
}

// --------------------------------------------------
// TUIセットアップと実行ループ
// --------------------------------------------------

pub fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

pub fn run_quiz(
    terminal: &mut Terminal<impl Backend>,
    mut screen: QuizScreen,
) -> Result<QuizExit> {
    screen.on_question_shown();

    loop {
        terminal.draw(|f| ui(f, &screen))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(exit) = screen.handle_key(key.code) {
                        return Ok(exit);
                    }
                }
            }
        }
    }
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

pub fn ui(f: &mut Frame, screen: &QuizScreen) {
    let size = f.area();
    let block = Block::default().borders(Borders::ALL).title("Kana Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let session = screen.session();
    let Some(question) = session.current() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 進捗ゲージ
            Constraint::Length(1), // [1] 空白
            Constraint::Length(3), // [2] 問題
            Constraint::Length(1), // [3] 空白
            Constraint::Length(5), // [4] 選択肢
            Constraint::Length(1), // [5] 空白
            Constraint::Length(1), // [6] 判定
            Constraint::Min(1),    // [7] 操作説明
        ])
        .split(inner_area);

    // 0. 進捗
    let (current, total) = session.progress();
    let ratio = if total > 0 {
        (current as f64 / total as f64).min(1.0)
    } else {
        0.0
    };
    let stats = session.stats();
    let label = format!("{current:02} / {total}  ✓ {}", stats.correct);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, chunks[0]);

    // 2. 問題
    let question_lines = match session.mode() {
        QuizMode::Listen => vec![
            Line::from("♪").style(Style::default().fg(Color::LightRed).bold()),
            Line::from("Space: もう一度聞く").style(Style::default().fg(Color::Gray)),
        ],
        QuizMode::Read => {
            let color = match (session.is_answered(), session.selected()) {
                (true, Some(i)) if question.is_correct(i) => Color::Green,
                (true, _) => Color::Red,
                _ => Color::White,
            };
            let romaji = if session.is_answered() {
                question.target.romaji
            } else {
                ""
            };
            vec![
                Line::from(question.target.kana).style(Style::default().fg(color).bold()),
                Line::from(romaji).style(Style::default().fg(Color::Gray)),
                Line::from(format!("字源: {}", question.target.origin))
                    .style(Style::default().fg(Color::DarkGray)),
            ]
        }
    };
    f.render_widget(Paragraph::new(question_lines).centered(), chunks[2]);

    // 4. 選択肢
    let option_lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_target = option.id == question.target.id;
            let is_selected = session.selected() == Some(i);

            let style = if session.is_answered() {
                if is_target {
                    Style::default().fg(Color::Green).bold()
                } else if is_selected {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            } else if is_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            let body = match (session.mode(), session.is_answered()) {
                (QuizMode::Listen, false) => option.kana.to_string(),
                (QuizMode::Listen, true) => {
                    format!("{} ({})  {}", option.kana, option.romaji, option.origin)
                }
                (QuizMode::Read, false) => format!("♪ {}", i + 1),
                (QuizMode::Read, true) => format!("♪ {} ({})", option.kana, option.romaji),
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(body, style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(option_lines).centered(), chunks[4]);

    // 6. 判定
    if session.is_answered() {
        let verdict = match session.selected() {
            Some(i) if question.is_correct(i) => {
                Line::from("正解！").style(Style::default().fg(Color::Green).bold())
            }
            _ => Line::from(format!(
                "残念… 正解は {} ({})",
                question.target.kana, question.target.romaji
            ))
            .style(Style::default().fg(Color::Red).bold()),
        };
        f.render_widget(Paragraph::new(verdict).centered(), chunks[6]);
    }

    // 7. 操作説明
    let help = match (session.mode(), session.is_answered()) {
        (_, true) => "Enter: 次へ  Esc: ホーム",
        (QuizMode::Listen, false) => "1-5: 選択  Space: 再生  Esc: ホーム",
        (QuizMode::Read, false) => "1-5: 選んで聞く  Space: 再生  Enter: 確認  Esc: ホーム",
    };
    f.render_widget(
        Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[7],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PlaybackResource, Speaker};
    use crate::error::AudioError;
    use crate::kana_data::find_by_id;
    use crate::quiz::build_questions;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::backend::TestBackend;
    use tokio_util::sync::CancellationToken;

    /// 何も鳴らさない
    struct Silent;

    #[async_trait]
    impl Speaker for Silent {
        async fn play_once(
            &self,
            _resource: &PlaybackResource,
            _cancel: CancellationToken,
        ) -> Result<(), AudioError> {
            Ok(())
        }
    }

    /// 長い音を流し、止められたかどうかを記録する
    #[derive(Default)]
    struct Recorder {
        steps: std::sync::Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl Speaker for Recorder {
        async fn play_once(
            &self,
            _resource: &PlaybackResource,
            cancel: CancellationToken,
        ) -> Result<(), AudioError> {
            self.steps.lock().unwrap().push("started");
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(10)) => {
                    self.steps.lock().unwrap().push("finished");
                    Ok(())
                }
                _ = cancel.cancelled() => {
                    self.steps.lock().unwrap().push("interrupted");
                    Err(AudioError::Interrupted)
                }
            }
        }
    }

    fn screen(mode: QuizMode, count: usize) -> QuizScreen {
        let pool: Vec<&'static SyllableEntry> =
            ["kana_あ", "kana_い", "kana_う", "kana_え", "kana_お"]
                .iter()
                .map(|id| find_by_id(id).unwrap())
                .collect();
        let questions = build_questions(&pool, count, &mut StdRng::seed_from_u64(3));
        QuizScreen::new(
            QuizSession::new(mode, questions),
            QuizSettings::default(),
            Arc::new(AudioService::new(Arc::new(Silent))),
            Handle::current(),
            2,
        )
    }

    fn key_for(screen: &QuizScreen, correct: bool) -> KeyCode {
        let q = screen.session().current().unwrap();
        let i = q
            .options
            .iter()
            .position(|k| (k.id == q.target.id) == correct)
            .unwrap();
        KeyCode::Char(char::from(b'1' + i as u8))
    }

    /// 全角文字の後ろの空きセルを含め、空白を除いた画面の文字列
    fn rendered(screen: &QuizScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| ui(f, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .filter(|symbol| *symbol != " ")
            .collect()
    }

    #[tokio::test]
    async fn listen_mode_runs_to_finish() {
        let mut screen = screen(QuizMode::Listen, 2);

        let wrong = key_for(&screen, false);
        assert_eq!(screen.handle_key(wrong), None);
        assert!(screen.session().is_answered());
        assert_eq!(screen.handle_key(KeyCode::Enter), None);
        assert_eq!(screen.session().progress(), (2, 2));

        let right = key_for(&screen, true);
        assert_eq!(screen.handle_key(right), None);
        match screen.handle_key(KeyCode::Enter) {
            Some(QuizExit::Finished(stats)) => {
                assert_eq!(stats.total, 2);
                assert_eq!(stats.correct, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn read_mode_confirms_with_enter() {
        let mut screen = screen(QuizMode::Read, 1);

        let right = key_for(&screen, true);
        assert_eq!(screen.handle_key(right), None);
        assert!(!screen.session().is_answered());

        assert_eq!(screen.handle_key(KeyCode::Enter), None);
        assert!(screen.session().is_answered());
        assert_eq!(screen.session().stats().correct, 1);
    }

    #[tokio::test]
    async fn escape_aborts() {
        let mut screen = screen(QuizMode::Listen, 3);
        assert_eq!(screen.handle_key(KeyCode::Esc), Some(QuizExit::Aborted));
    }

    #[tokio::test]
    async fn keys_outside_options_are_ignored() {
        let mut screen = screen(QuizMode::Listen, 1);
        assert_eq!(screen.handle_key(KeyCode::Char('9')), None);
        assert_eq!(screen.handle_key(KeyCode::Char('x')), None);
        assert!(!screen.session().is_answered());
    }

    #[tokio::test]
    async fn read_mode_reveals_romaji_after_answer() {
        let mut screen = screen(QuizMode::Read, 1);
        let target = screen.session().current().unwrap().target;

        let before = rendered(&screen);
        assert!(before.contains(target.kana));
        assert!(!before.contains("正解"));

        let right = key_for(&screen, true);
        screen.handle_key(right);
        screen.handle_key(KeyCode::Enter);

        let after = rendered(&screen);
        assert!(after.contains("正解"));
        assert!(after.contains(&format!("♪{}({})", target.kana, target.romaji)));
    }

    #[tokio::test]
    async fn listen_mode_reveals_romaji_and_origin_after_answer() {
        let mut screen = screen(QuizMode::Listen, 1);
        let question = screen.session().current().unwrap();
        let first = question.options[0];

        assert!(!rendered(&screen).contains(first.origin));

        let right = key_for(&screen, true);
        screen.handle_key(right);

        let after = rendered(&screen);
        for option in &screen.session().current().unwrap().options {
            let line = format!("{}({}){}", option.kana, option.romaji, option.origin);
            assert!(after.contains(&line), "{line} not in {after}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn next_question_stops_previous_sound() {
        let speaker = Arc::new(Recorder::default());
        let mut screen = screen(QuizMode::Read, 2);
        screen.audio = Arc::new(AudioService::new(speaker.clone()));

        // 選んだ音がまだ鳴っているうちに確定して次へ
        let wrong = key_for(&screen, false);
        screen.handle_key(wrong);
        tokio::time::sleep(Duration::from_millis(10)).await;
        screen.handle_key(KeyCode::Enter);
        screen.handle_key(KeyCode::Enter);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(screen.session().progress(), (2, 2));
        assert_eq!(*speaker.steps.lock().unwrap(), vec!["started", "interrupted"]);
    }
}
