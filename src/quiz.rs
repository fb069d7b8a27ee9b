/*
 * src/quiz.rs
 * 出題の設定・問題セットの作成・1回分のクイズの進行
 */

use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::audio::AudioSource;
use crate::kana_data::{KANA_LIST, Script, SoundClass, SyllableEntry};
use crate::stats::ScoreTally;

/// 1問あたりの選択肢の数 (正解1 + ダミー4)
pub const OPTION_COUNT: usize = 5;

pub const MIN_QUESTIONS: usize = 20;
pub const MAX_QUESTIONS: usize = 200;
pub const QUESTION_STEP: usize = 10;

// --------------------------------------------------
// 設定
// --------------------------------------------------

/// 出題する文字
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ScriptFilter {
    Hiragana,
    Katakana,
    Mixed,
}

impl ScriptFilter {
    pub const ALL: [ScriptFilter; 3] = [
        ScriptFilter::Hiragana,
        ScriptFilter::Katakana,
        ScriptFilter::Mixed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScriptFilter::Hiragana => "あ Hiragana",
            ScriptFilter::Katakana => "ア Katakana",
            ScriptFilter::Mixed => "Mix",
        }
    }

    fn accepts(self, script: Script) -> bool {
        match self {
            ScriptFilter::Hiragana => script == Script::Hiragana,
            ScriptFilter::Katakana => script == Script::Katakana,
            ScriptFilter::Mixed => true,
        }
    }
}

/// 出題する音の種類
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    Seion,
    Dakuon,
    Yoon,
    All,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::Seion,
        CategoryFilter::Dakuon,
        CategoryFilter::Yoon,
        CategoryFilter::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::Seion => "清音",
            CategoryFilter::Dakuon => "濁音",
            CategoryFilter::Yoon => "拗音",
            CategoryFilter::All => "All",
        }
    }

    fn accepts(self, class: SoundClass) -> bool {
        match self {
            CategoryFilter::Seion => class == SoundClass::Seion,
            CategoryFilter::Dakuon => class == SoundClass::Dakuon,
            CategoryFilter::Yoon => class == SoundClass::Yoon,
            CategoryFilter::All => true,
        }
    }
}

/// 出題形式
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum QuizMode {
    /// 発音 ➡ 五十音 (聞いて文字を選ぶ)
    Listen,
    /// 五十音 ➡ 発音 (文字を見て音を選ぶ)
    Read,
}

impl QuizMode {
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Listen => "発音 ➡ 五十音 (Listen & Select)",
            QuizMode::Read => "五十音 ➡ 発音 (Read & Select)",
        }
    }
}

/// クイズの設定 (設定が変わるたびに問題を作り直す)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pub question_count: usize,
    pub script: ScriptFilter,
    pub category: CategoryFilter,
    pub audio_source: AudioSource,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: MIN_QUESTIONS,
            script: ScriptFilter::Hiragana,
            category: CategoryFilter::All,
            audio_source: AudioSource::Youdao,
        }
    }
}

impl QuizSettings {
    /// 選べる問題数 (20, 30, ... 200)
    pub fn question_count_choices() -> impl Iterator<Item = usize> {
        (MIN_QUESTIONS..=MAX_QUESTIONS).step_by(QUESTION_STEP)
    }

    /// 範囲外の問題数を 20..=200 の10刻みに丸める
    pub fn clamp_count(count: usize) -> usize {
        let count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
        count - (count - MIN_QUESTIONS) % QUESTION_STEP
    }

    pub fn accepts(&self, entry: &SyllableEntry) -> bool {
        self.script.accepts(entry.script) && self.category.accepts(entry.sound_class)
    }

    /// 文字 → 種類 の順に絞り込む
    pub fn filter_pool(&self, catalog: &'static [SyllableEntry]) -> Vec<&'static SyllableEntry> {
        catalog.iter().filter(|k| self.accepts(k)).collect()
    }
}

// --------------------------------------------------
// 問題セットの作成
// --------------------------------------------------

/// 1問分
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub target: &'static SyllableEntry,
    /// 正解を1つだけ含む、並びがシャッフルされた選択肢
    pub options: Vec<&'static SyllableEntry>,
}

impl QuizQuestion {
    pub fn is_correct(&self, option_index: usize) -> bool {
        self.options
            .get(option_index)
            .is_some_and(|k| k.id == self.target.id)
    }
}

/// 問題セットを作る。
/// 絞り込んだ結果が5件未満なら、このセット全体を全かなで作る
pub fn build_questions<R: Rng + ?Sized>(
    pool: &[&'static SyllableEntry],
    desired_count: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let pool: Vec<&'static SyllableEntry> = if pool.len() < OPTION_COUNT {
        warn!(
            filtered = pool.len(),
            "not enough kana for the current filter, using the full catalog"
        );
        KANA_LIST.iter().collect()
    } else {
        pool.to_vec()
    };

    // 同じかなを2回出題しない
    let count = desired_count.min(pool.len());
    let mut targets = pool.clone();
    targets.shuffle(rng);
    targets.truncate(count);

    targets
        .into_iter()
        .map(|target| {
            // ダミーは同じプールから選ぶ
            let mut distractors: Vec<&'static SyllableEntry> = pool
                .iter()
                .copied()
                .filter(|k| k.id != target.id)
                .collect();
            distractors.shuffle(rng);
            distractors.truncate(OPTION_COUNT - 1);

            let mut options = Vec::with_capacity(OPTION_COUNT);
            options.push(target);
            options.extend(distractors);
            options.shuffle(rng);

            QuizQuestion { target, options }
        })
        .collect()
}

// --------------------------------------------------
// クイズの進行
// --------------------------------------------------

/// 選択肢を選んだ結果
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 回答が確定した (Listen モード)
    Answered { correct: bool },
    /// 選んだだけ (Read モード。確定は confirm で行う)
    Marked,
    /// 回答済み、または範囲外
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    Next,
    Finished,
    /// まだ答えていない
    NotAnswered,
}

/// 1回分のクイズ
#[derive(Debug, Clone)]
pub struct QuizSession {
    mode: QuizMode,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    stats: ScoreTally,
    selected: Option<usize>,
    answered: bool,
}

impl QuizSession {
    pub fn new(mode: QuizMode, questions: Vec<QuizQuestion>) -> Self {
        Self {
            mode,
            questions,
            current_index: 0,
            stats: ScoreTally::new(),
            selected: None,
            answered: false,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    /// (何問目か (1始まり), 全問題数)
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.questions.len())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn stats(&self) -> &ScoreTally {
        &self.stats
    }

    pub fn select(&mut self, option_index: usize) -> Selection {
        let Some(question) = self.current() else {
            return Selection::Ignored;
        };
        if self.answered || option_index >= question.options.len() {
            return Selection::Ignored;
        }

        self.selected = Some(option_index);
        match self.mode {
            QuizMode::Listen => match self.confirm() {
                Some(correct) => Selection::Answered { correct },
                None => Selection::Ignored,
            },
            QuizMode::Read => Selection::Marked,
        }
    }

    /// 選んだ選択肢で回答を確定し、成績に記録する (1問1回まで)
    pub fn confirm(&mut self) -> Option<bool> {
        if self.answered {
            return None;
        }
        let selected = self.selected?;
        let question = self.questions.get(self.current_index)?;

        let correct = question.is_correct(selected);
        self.answered = true;
        self.stats.record(correct, question.target.id);
        Some(correct)
    }

    pub fn advance(&mut self) -> Advance {
        if !self.answered {
            return Advance::NotAnswered;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected = None;
            self.answered = false;
            Advance::Next
        } else {
            Advance::Finished
        }
    }
}

/// 設定から新しいクイズを作る
pub fn build_session<R: Rng + ?Sized>(
    settings: &QuizSettings,
    mode: QuizMode,
    rng: &mut R,
) -> QuizSession {
    let pool = settings.filter_pool(KANA_LIST);
    let questions = build_questions(&pool, settings.question_count, rng);
    info!(
        ?mode,
        script = ?settings.script,
        category = ?settings.category,
        pool = pool.len(),
        questions = questions.len(),
        "quiz session built"
    );
    QuizSession::new(mode, questions)
}
