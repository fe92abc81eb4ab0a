//! 手の履歴管理モジュール
//! 1手ごとの差分（反転した石と反転前の所有者、特殊石の残数）をスタックに積み、
//! 1手ずつのundoを可能にする。

use serde::{Deserialize, Serialize};

use super::player::SpecialAllowance;
use super::types::{FlippedDisc, Move};

/// 適用に成功した1手分の履歴
/// 連鎖反転で変わったマスも含め、所有者が変わった全てのマスを値として保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mv: Move,
    pub flipped: Vec<FlippedDisc>,
    /// 着手したプレイヤーの着手前の特殊石残数
    pub allowance_before: SpecialAllowance,
}

/// 履歴エントリのLIFOスタック
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 古い順に履歴を走査する
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
