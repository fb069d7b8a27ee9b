/*
 * src/stats.rs
 * 正解数・ミス回数の集計
 */

use std::collections::HashMap;

/// 1回のクイズの成績
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub total: u32,
    pub correct: u32,
    /// key: SyllableEntry.id, value: ミス回数
    pub miss_histogram: HashMap<&'static str, u32>,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1問分の回答を記録する
    pub fn record(&mut self, was_correct: bool, target_id: &'static str) -> &Self {
        self.total += 1;
        if was_correct {
            self.correct += 1;
        } else {
            *self.miss_histogram.entry(target_id).or_insert(0) += 1;
        }
        self
    }

    /// 正答率 (%)。まだ1問も答えていなければ 0
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// ミスの多い順に `limit` 件 (同数はID順)
    pub fn top_misses(&self, limit: usize) -> Vec<(&'static str, u32)> {
        let mut misses: Vec<(&'static str, u32)> =
            self.miss_histogram.iter().map(|(id, n)| (*id, *n)).collect();
        misses.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        misses.truncate(limit);
        misses
    }
}
