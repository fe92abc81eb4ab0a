//! プレイヤー情報モジュール
//! 座席、勝利数、特殊石の残数を管理する。

use serde::{Deserialize, Serialize};

use super::types::{DiscKind, Seat};

/// 特殊石の初期ボム数
pub const DEFAULT_BOMBS: u8 = 3;
/// 特殊石の初期反転不可石数
pub const DEFAULT_UNFLIPPABLES: u8 = 2;

/// 特殊石の残数
/// undoで正確に戻せるよう、着手前の値を履歴に保存する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAllowance {
    pub bombs: u8,
    pub unflippables: u8,
}

impl Default for SpecialAllowance {
    fn default() -> Self {
        Self {
            bombs: DEFAULT_BOMBS,
            unflippables: DEFAULT_UNFLIPPABLES,
        }
    }
}

/// ゲームに参加するプレイヤー
/// 残数の変更はエンジン経由でのみ行われる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    seat: Seat,
    wins: u32,
    allowance: SpecialAllowance,
    is_human: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, is_human: bool) -> Self {
        Self {
            name: name.into(),
            seat: Seat::First,
            wins: 0,
            allowance: SpecialAllowance::default(),
            is_human,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn bombs_remaining(&self) -> u8 {
        self.allowance.bombs
    }

    pub fn unflippables_remaining(&self) -> u8 {
        self.allowance.unflippables
    }

    pub fn allowance(&self) -> SpecialAllowance {
        self.allowance
    }

    /// 指定種類の石をあと何個置けるか
    /// 通常石は無制限
    pub fn remaining(&self, kind: DiscKind) -> Option<u8> {
        match kind {
            DiscKind::Simple => None,
            DiscKind::Bomb => Some(self.allowance.bombs),
            DiscKind::Unflippable => Some(self.allowance.unflippables),
        }
    }

    pub(crate) fn bind_seat(&mut self, seat: Seat) {
        self.seat = seat;
    }

    pub(crate) fn set_allowance(&mut self, allowance: SpecialAllowance) {
        self.allowance = allowance;
    }

    /// 特殊石を1つ消費する
    /// 残数が0の場合は何もせずfalseを返す
    pub(crate) fn consume(&mut self, kind: DiscKind) -> bool {
        let counter = match kind {
            DiscKind::Simple => return true,
            DiscKind::Bomb => &mut self.allowance.bombs,
            DiscKind::Unflippable => &mut self.allowance.unflippables,
        };
        match counter.checked_sub(1) {
            Some(left) => {
                *counter = left;
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn revoke_win(&mut self) {
        self.wins = self.wins.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new_defaults() {
        let player = Player::human("alice");

        assert_eq!(player.name(), "alice");
        assert!(player.is_human());
        assert_eq!(player.wins(), 0);
        assert_eq!(player.bombs_remaining(), 3);
        assert_eq!(player.unflippables_remaining(), 2);
    }

    #[test]
    fn test_player_remaining_by_kind() {
        let player = Player::ai("bot");

        assert_eq!(player.remaining(DiscKind::Simple), None);
        assert_eq!(player.remaining(DiscKind::Bomb), Some(3));
        assert_eq!(player.remaining(DiscKind::Unflippable), Some(2));
    }

    #[test]
    fn test_player_consume_never_goes_negative() {
        let mut player = Player::ai("bot");

        assert!(player.consume(DiscKind::Unflippable));
        assert!(player.consume(DiscKind::Unflippable));
        assert!(!player.consume(DiscKind::Unflippable));
        assert_eq!(player.unflippables_remaining(), 0);
        assert_eq!(player.bombs_remaining(), 3);
    }

    #[test]
    fn test_player_consume_simple_is_free() {
        let mut player = Player::ai("bot");

        assert!(player.consume(DiscKind::Simple));
        assert_eq!(player.allowance(), SpecialAllowance::default());
    }

    #[test]
    fn test_player_wins() {
        let mut player = Player::ai("bot");

        player.add_win();
        player.add_win();
        assert_eq!(player.wins(), 2);

        player.revoke_win();
        player.revoke_win();
        player.revoke_win();
        assert_eq!(player.wins(), 0);
    }
}
