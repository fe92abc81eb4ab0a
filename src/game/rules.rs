//! ボム・リバーシのルール実装モジュール
//! 合法手の判定、方向ごとの反転列の探索、ボムの連鎖反転を担当する。

use std::collections::BTreeSet;

use tracing::debug;

use super::board::Board;
use super::types::{Disc, DiscKind, FlippedDisc, Position, Seat, DIRECTIONS};

/// リバーシのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct ReversiRules;

impl ReversiRules {
    /// 指定方向に連続する相手の石を集める
    /// 自分の石で挟めた場合のみその列を返し、空マスか盤端に達した場合は空を返す
    pub fn directional_flip(
        board: &Board,
        position: Position,
        owner: Seat,
        direction: (i8, i8),
    ) -> Vec<Position> {
        let mut run = Vec::new();
        let mut current = position.offset(direction);

        while let Some(pos) = current {
            match board.get(pos) {
                None => return Vec::new(),
                // 自分の石で終端。相手の石が1つもなければ空のまま
                Some(disc) if disc.owner == owner => return run,
                Some(_) => run.push(pos),
            }
            current = pos.offset(direction);
        }

        Vec::new()
    }

    /// 指定した石を置けるかチェックする
    /// 空マスで、かつ少なくとも1方向で相手の石を挟める必要がある。石の種類は関係しない
    pub fn is_legal(board: &Board, position: Position, disc: &Disc) -> bool {
        if !board.is_empty(position) {
            return false;
        }

        DIRECTIONS.iter().any(|&direction| {
            !Self::directional_flip(board, position, disc.owner, direction).is_empty()
        })
    }

    /// 指定したプレイヤーの合法手を全て取得する
    pub fn valid_moves(board: &Board, owner: Seat) -> Vec<Position> {
        let disc = Disc::simple(owner);
        Board::positions()
            .filter(|&position| Self::is_legal(board, position, &disc))
            .collect()
    }

    /// 指定した位置に置いた場合に所有者が変わる石の数
    /// 作業用の盤面で実際に反転処理を行うため、ボムの連鎖も重複なく数えられる
    pub fn flip_count(board: &Board, position: Position, owner: Seat) -> usize {
        let disc = Disc::simple(owner);
        if !Self::is_legal(board, position, &disc) {
            return 0;
        }

        let mut scratch = *board;
        scratch.place(position, disc);
        Self::apply_flips(&mut scratch, position, owner).len()
    }

    /// 置いた石から8方向の反転を実行する
    /// 反転列は全て着手直後の盤面で求め、その後1つの影響済み集合を共有しながら反転する。
    /// 戻り値は反転した順の座標と反転前の所有者
    pub fn apply_flips(board: &mut Board, position: Position, owner: Seat) -> Vec<FlippedDisc> {
        let runs: Vec<Position> = DIRECTIONS
            .iter()
            .flat_map(|&direction| Self::directional_flip(board, position, owner, direction))
            .collect();

        let mut already_affected = BTreeSet::new();
        let mut flipped = Vec::new();

        for pos in runs {
            if already_affected.contains(&pos) {
                continue;
            }
            let Some(disc) = board.get(pos) else {
                continue;
            };

            match disc.kind {
                DiscKind::Unflippable => {}
                DiscKind::Simple => {
                    flipped.push(Self::flip(board, pos, disc, owner, &mut already_affected));
                }
                DiscKind::Bomb => {
                    flipped.push(Self::flip(board, pos, disc, owner, &mut already_affected));
                    debug!(row = pos.row, col = pos.col, "bomb exploded");
                    let chained =
                        Self::resolve_bomb_chain(board, pos, owner, &mut already_affected);
                    flipped.extend(chained);
                }
            }
        }

        flipped
    }

    /// ボムの周囲8マスの相手石を反転させ、巻き込まれたボムから再帰的に連鎖させる
    /// 影響済み集合に入ったマスは二度と反転しないため、隣接ボム同士でも必ず停止する。
    /// 反転不可石はそのマスだけ連鎖を止める
    pub fn resolve_bomb_chain(
        board: &mut Board,
        bomb: Position,
        new_owner: Seat,
        already_affected: &mut BTreeSet<Position>,
    ) -> Vec<FlippedDisc> {
        let mut flipped = Vec::new();

        for &direction in &DIRECTIONS {
            let Some(neighbor) = bomb.offset(direction) else {
                continue;
            };
            let Some(disc) = board.get(neighbor) else {
                continue;
            };
            if disc.owner == new_owner || already_affected.contains(&neighbor) {
                continue;
            }

            match disc.kind {
                DiscKind::Unflippable => {}
                DiscKind::Simple => {
                    flipped.push(Self::flip(board, neighbor, disc, new_owner, already_affected));
                }
                DiscKind::Bomb => {
                    flipped.push(Self::flip(board, neighbor, disc, new_owner, already_affected));
                    debug!(row = neighbor.row, col = neighbor.col, "chained bomb exploded");
                    let chained =
                        Self::resolve_bomb_chain(board, neighbor, new_owner, already_affected);
                    flipped.extend(chained);
                }
            }
        }

        flipped
    }

    fn flip(
        board: &mut Board,
        position: Position,
        disc: Disc,
        new_owner: Seat,
        already_affected: &mut BTreeSet<Position>,
    ) -> FlippedDisc {
        board.set_owner(position, new_owner);
        already_affected.insert(position);
        debug!(
            row = position.row,
            col = position.col,
            kind = ?disc.kind,
            owner = ?new_owner,
            "disc flipped"
        );

        FlippedDisc {
            position,
            previous_owner: disc.owner,
        }
    }
}
