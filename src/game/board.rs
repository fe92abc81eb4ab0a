//! ボム・リバーシの盤面状態を管理するモジュール
//! 8x8グリッドの各マスに置かれた石（または空）を保持する。

use super::types::{Disc, Position, Seat, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// 8x8盤面を表現する構造体
/// 各マスは空か、ちょうど1つの石を持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Disc>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 石のない空の盤面を作成する
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 中央4マスに初期配置を設定した盤面を作成する
    /// 先手は(3,3)と(4,4)、後手は(3,4)と(4,3)
    pub fn with_starting_layout() -> Self {
        let mut board = Self::empty();
        let mid = BOARD_SIZE / 2;

        board.cells[mid - 1][mid - 1] = Some(Disc::simple(Seat::First));
        board.cells[mid - 1][mid] = Some(Disc::simple(Seat::Second));
        board.cells[mid][mid - 1] = Some(Disc::simple(Seat::Second));
        board.cells[mid][mid] = Some(Disc::simple(Seat::First));

        board
    }

    /// 指定した位置の石を取得する
    pub fn get(&self, position: Position) -> Option<Disc> {
        if position.is_valid() {
            self.cells[position.row][position.col]
        } else {
            None
        }
    }

    /// 指定した位置に石を置く
    /// 範囲外の場合はfalseを返す
    pub fn place(&mut self, position: Position, disc: Disc) -> bool {
        if position.is_valid() {
            self.cells[position.row][position.col] = Some(disc);
            true
        } else {
            false
        }
    }

    /// 指定した位置の石を取り除き、取り除いた石を返す
    pub fn remove(&mut self, position: Position) -> Option<Disc> {
        if position.is_valid() {
            self.cells[position.row][position.col].take()
        } else {
            None
        }
    }

    /// 石の所有者だけを変更する（種類は変えない）
    /// 空マスまたは範囲外の場合はfalseを返す
    pub fn set_owner(&mut self, position: Position, owner: Seat) -> bool {
        if !position.is_valid() {
            return false;
        }
        match self.cells[position.row][position.col].as_mut() {
            Some(disc) => {
                disc.owner = owner;
                true
            }
            None => false,
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        position.is_valid() && self.cells[position.row][position.col].is_none()
    }

    /// 全マスが埋まっているか
    pub fn is_full(&self) -> bool {
        self.disc_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// 盤面上の石の総数
    pub fn disc_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// 座席ごとの石数を数える
    /// 戻り値: (先手の石数, 後手の石数)
    pub fn count_discs(&self) -> (u8, u8) {
        let mut first = 0;
        let mut second = 0;

        for disc in self.cells.iter().flatten().flatten() {
            match disc.owner {
                Seat::First => first += 1,
                Seat::Second => second += 1,
            }
        }

        (first, second)
    }

    /// 全マスの座標を行優先で列挙する
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// 石の種類ごとの記号に、所有者を示す番号(1/2)を添える
    pub fn display(&self) -> String {
        let mut result = String::new();
        result.push_str("   0  1  2  3  4  5  6  7\n");

        for (row_idx, row) in self.cells.iter().enumerate() {
            result.push_str(&format!("{} ", row_idx));
            for cell in row {
                let symbol = match cell {
                    None => " . ".to_string(),
                    Some(disc) => {
                        let seat = match disc.owner {
                            Seat::First => 1,
                            Seat::Second => 2,
                        };
                        format!("{}{}", disc.kind.glyph(), seat)
                    }
                };
                result.push_str(&symbol);
            }
            result.push('\n');
        }

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
