//! ゲームの基本型定義モジュール
//! 座席、石の種類、座標、手など、ボム・リバーシで使用される基本的な型を定義する。

use serde::{Deserialize, Serialize};

/// 盤面の一辺のマス数
pub const BOARD_SIZE: usize = 8;

/// 盤面上の8方向への移動ベクトル
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),  // 左上、上、右上
    (0, -1),           (0, 1),   // 左、右
    (1, -1),  (1, 0),  (1, 1),   // 左下、下、右下
];

/// プレイヤーの座席を表すenum
/// 先手がFirst、後手がSecond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// 相手の座席を返す
    pub fn opposite(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// プレイヤー配列のインデックスに変換する
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// 石の種類を表すenum
/// 通常石、ボム石、反転不可石の3種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscKind {
    /// 通常の反転可能な石
    Simple,
    /// 反転されると周囲8マスの相手石を連鎖的に反転させる石
    Bomb,
    /// 置かれた後は所有者が変わらない石
    Unflippable,
}

impl DiscKind {
    /// 盤面表示用の記号
    pub fn glyph(self) -> &'static str {
        match self {
            DiscKind::Simple => "⬤",
            DiscKind::Bomb => "💣",
            DiscKind::Unflippable => "⭕",
        }
    }
}

/// 盤面上の1つの石
/// 所有者は反転で変わるが、種類は置かれた後に変わらない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disc {
    pub owner: Seat,
    pub kind: DiscKind,
}

impl Disc {
    pub fn new(owner: Seat, kind: DiscKind) -> Self {
        Self { owner, kind }
    }

    pub fn simple(owner: Seat) -> Self {
        Self::new(owner, DiscKind::Simple)
    }

    pub fn bomb(owner: Seat) -> Self {
        Self::new(owner, DiscKind::Bomb)
    }

    pub fn unflippable(owner: Seat) -> Self {
        Self::new(owner, DiscKind::Unflippable)
    }
}

/// 8x8盤面上の座標を表す構造体
/// row, colともに0-7の範囲で有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// 盤面の範囲外の座標の場合はNoneを返す
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// 指定方向に1マス進んだ座標を返す
    /// 盤外に出る場合はNone
    pub fn offset(self, (dr, dc): (i8, i8)) -> Option<Position> {
        let row = self.row.checked_add_signed(dr as isize)?;
        let col = self.col.checked_add_signed(dc as isize)?;
        Position::new(row, col)
    }
}

/// 反転された石の記録
/// undo時に元の所有者へ戻すために反転前の所有者を保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlippedDisc {
    pub position: Position,
    pub previous_owner: Seat,
}

/// ゲームの1手を表現する構造体
/// 置いた石（種類と着手時の所有者）とタイムスタンプを保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub disc: Disc,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Move {
    /// 新しい手を作成する
    /// タイムスタンプは現在時刻で自動設定される
    pub fn new(position: Position, disc: Disc) -> Self {
        Self {
            position,
            disc,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_opposite() {
        assert_eq!(Seat::First.opposite(), Seat::Second);
        assert_eq!(Seat::Second.opposite(), Seat::First);
    }

    #[test]
    fn test_seat_index() {
        assert_eq!(Seat::First.index(), 0);
        assert_eq!(Seat::Second.index(), 1);
    }

    #[test]
    fn test_disc_constructors() {
        assert_eq!(Disc::bomb(Seat::First), Disc { owner: Seat::First, kind: DiscKind::Bomb });
        assert_eq!(Disc::simple(Seat::Second).kind, DiscKind::Simple);
        assert_eq!(Disc::unflippable(Seat::Second).owner, Seat::Second);
    }

    #[test]
    fn test_position_new_invalid() {
        assert!(Position::new(8, 4).is_none());
        assert!(Position::new(3, 8).is_none());
        assert_eq!(Position::new(3, 4), Some(Position { row: 3, col: 4 }));
    }

    #[test]
    fn test_position_offset() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset((-1, 0)), None);
        assert_eq!(corner.offset((0, -1)), None);
        assert_eq!(corner.offset((1, 1)), Position::new(1, 1));

        let edge = Position::new(7, 3).unwrap();
        assert_eq!(edge.offset((1, 0)), None);
        assert_eq!(edge.offset((-1, 1)), Position::new(6, 4));
    }

    #[test]
    fn test_position_ordering_is_row_major() {
        let a = Position::new(1, 7).unwrap();
        let b = Position::new(2, 0).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_move_creation() {
        let pos = Position::new(2, 4).unwrap();
        let m = Move::new(pos, Disc::bomb(Seat::First));

        assert_eq!(m.position, pos);
        assert_eq!(m.disc.kind, DiscKind::Bomb);
    }
}
