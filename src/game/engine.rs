//! ゲームエンジンモジュール
//! 手番の管理、着手の検証と適用、履歴によるundo、終局判定と勝敗の集計を担当する。
//! 盤面・両プレイヤー・履歴はこのエンジンが排他的に所有する。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::board::Board;
use super::history::{HistoryEntry, MoveHistory};
use super::player::Player;
use super::rules::ReversiRules;
use super::types::{Disc, DiscKind, Move, Position, Seat};
use crate::config::{RulesConfig, TiePolicy};
use crate::error::{GameError, Result};

/// 終局時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Seat),
    Draw,
}

/// ゲームの進行状態
/// 盤面から毎回導出され、キャッシュされない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 着手待ち
    InProgress { to_move: Seat },
    /// 終局（結果と最終スコア（先手, 後手））
    Finished { outcome: GameOutcome, score: (u8, u8) },
}

/// ボム・リバーシのゲームエンジン
#[derive(Debug, Clone)]
pub struct GameEngine {
    id: Uuid,
    rules: RulesConfig,
    board: Board,
    players: Option<[Player; 2]>,
    current: Seat,
    placed_discs: usize,
    history: MoveHistory,
    /// 勝利数を加算済みの結果。二重加算を防ぐ
    scored: Option<GameOutcome>,
}

impl GameEngine {
    /// デフォルトルールでプレイヤー未設定のエンジンを作成する
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    pub fn with_rules(rules: RulesConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules,
            board: Board::empty(),
            players: None,
            current: Seat::First,
            placed_discs: 0,
            history: MoveHistory::new(),
            scored: None,
        }
    }

    /// 任意の局面からゲームを開始する
    /// 詰め問題やテスト用
    pub fn from_board(
        rules: RulesConfig,
        first: Player,
        second: Player,
        board: Board,
        to_move: Seat,
    ) -> Self {
        let mut engine = Self::with_rules(rules);
        engine.bind_players(first, second);
        engine.board = board;
        engine.current = to_move;
        engine.placed_discs = board.disc_count();
        engine
    }

    /// プレイヤーを座席に割り当て、初期配置でゲームを開始する
    /// 特殊石の残数はルールの初期値に戻る。勝利数は保持される
    pub fn set_players(&mut self, first: Player, second: Player) {
        self.bind_players(first, second);
        self.start_new_game();
    }

    /// 同じプレイヤーで新しいゲームを開始する
    pub fn reset(&mut self) -> Result<()> {
        let allowance = self.rules.starting_allowance();
        let players = self.players.as_mut().ok_or(GameError::PlayersNotSet)?;
        for player in players.iter_mut() {
            player.set_allowance(allowance);
        }
        self.start_new_game();
        Ok(())
    }

    fn bind_players(&mut self, mut first: Player, mut second: Player) {
        let allowance = self.rules.starting_allowance();
        first.bind_seat(Seat::First);
        first.set_allowance(allowance);
        second.bind_seat(Seat::Second);
        second.set_allowance(allowance);
        self.players = Some([first, second]);
    }

    fn start_new_game(&mut self) {
        self.board = Board::with_starting_layout();
        self.current = Seat::First;
        self.placed_discs = self.board.disc_count();
        self.history.clear();
        self.scored = None;
        debug!(game_id = %self.id, "new game started");
    }

    fn players_ref(&self) -> Result<&[Player; 2]> {
        self.players.as_ref().ok_or(GameError::PlayersNotSet)
    }

    /// 石を置き、挟んだ石とボムの連鎖を反転させる
    /// 検証は全て状態を変更する前に行い、拒否された場合は何も変わらない。
    /// 戻り値は所有者が変わった石の位置
    pub fn apply_move(&mut self, position: Position, disc: Disc) -> Result<Vec<Position>> {
        let players = self.players_ref()?;
        let mover = &players[self.current.index()];

        if mover.remaining(disc.kind) == Some(0) {
            let what = match disc.kind {
                DiscKind::Bomb => "bombs",
                DiscKind::Unflippable => "unflippables",
                DiscKind::Simple => "discs",
            };
            return Err(self.reject(format!("No {} left for {}", what, mover.name())));
        }

        if disc.owner != self.current {
            return Err(self.reject(format!("It is not {:?}'s turn", disc.owner)));
        }

        if !ReversiRules::is_legal(&self.board, position, &disc) {
            return Err(self.reject(format!(
                "Position ({}, {}) is not a valid move for {:?}",
                position.row, position.col, self.current
            )));
        }

        let players = self.players.as_mut().ok_or(GameError::PlayersNotSet)?;
        let mover = &mut players[self.current.index()];
        let allowance_before = mover.allowance();
        let consumed = mover.consume(disc.kind);
        debug_assert!(consumed, "allowance is checked before placement");

        self.board.place(position, disc);
        debug!(
            game_id = %self.id,
            seat = ?self.current,
            kind = ?disc.kind,
            row = position.row,
            col = position.col,
            "disc placed"
        );

        let flipped = ReversiRules::apply_flips(&mut self.board, position, self.current);
        let affected = flipped.iter().map(|f| f.position).collect();

        self.history.push(HistoryEntry {
            mv: Move::new(position, disc),
            flipped,
            allowance_before,
        });

        self.current = self.current.opposite();
        self.placed_discs += 1;

        Ok(affected)
    }

    fn reject(&self, reason: String) -> GameError {
        debug!(game_id = %self.id, %reason, "move rejected");
        GameError::invalid_move(reason)
    }

    /// 直前の1手を取り消す
    /// 反転した全ての石（連鎖分を含む）を元の所有者に戻し、置いた石を取り除く
    pub fn undo(&mut self) -> Result<Move> {
        let entry = self.history.pop().ok_or(GameError::EmptyHistory)?;
        let players = self.players.as_mut().ok_or(GameError::PlayersNotSet)?;
        let mover = entry.mv.disc.owner;

        for flipped in entry.flipped.iter().rev() {
            self.board.set_owner(flipped.position, flipped.previous_owner);
        }
        self.board.remove(entry.mv.position);
        players[mover.index()].set_allowance(entry.allowance_before);

        // 終局で加算した勝利は、局面が戻るので取り消す
        if let Some(GameOutcome::Winner(seat)) = self.scored.take() {
            players[seat.index()].revoke_win();
        }

        self.current = mover;
        self.placed_discs -= 1;

        debug!(
            game_id = %self.id,
            row = entry.mv.position.row,
            col = entry.mv.position.col,
            restored = entry.flipped.len(),
            "move undone"
        );

        Ok(entry.mv)
    }

    pub fn disc_at(&self, position: Position) -> Result<Option<Disc>> {
        self.players_ref()?;
        Ok(self.board.get(position))
    }

    /// 手番のプレイヤーの合法手
    pub fn valid_moves(&self) -> Result<Vec<Position>> {
        self.players_ref()?;
        Ok(ReversiRules::valid_moves(&self.board, self.current))
    }

    /// 手番のプレイヤーが指定位置に置いた場合に反転する石の数
    pub fn flip_count(&self, position: Position) -> Result<usize> {
        self.players_ref()?;
        Ok(ReversiRules::flip_count(&self.board, position, self.current))
    }

    pub fn is_first_player_turn(&self) -> bool {
        self.current == Seat::First
    }

    /// 盤面が埋まったか、手番のプレイヤーに合法手がないか
    pub fn is_terminal(&self) -> Result<bool> {
        self.players_ref()?;
        Ok(self.board.is_full() || ReversiRules::valid_moves(&self.board, self.current).is_empty())
    }

    /// 終局判定を行う
    /// 初めて終局を検出したときだけ石数を集計し、勝者の勝利数を1つ加算する
    pub fn is_game_finished(&mut self) -> Result<bool> {
        if !self.is_terminal()? {
            return Ok(false);
        }

        if self.scored.is_none() {
            let outcome = self.decide_outcome();
            if let GameOutcome::Winner(seat) = outcome {
                if let Some(players) = self.players.as_mut() {
                    players[seat.index()].add_win();
                }
            }
            self.scored = Some(outcome);

            let (first, second) = self.board.count_discs();
            info!(game_id = %self.id, ?outcome, first, second, "game finished");
        }

        Ok(true)
    }

    /// 石の実際の所有者で集計して結果を決める
    fn decide_outcome(&self) -> GameOutcome {
        let (first, second) = self.board.count_discs();

        if first > second {
            GameOutcome::Winner(Seat::First)
        } else if second > first {
            GameOutcome::Winner(Seat::Second)
        } else {
            match self.rules.tie_policy {
                TiePolicy::NoWinner => GameOutcome::Draw,
                TiePolicy::SecondPlayerWins => GameOutcome::Winner(Seat::Second),
            }
        }
    }

    /// 現在の進行状態を副作用なしで返す
    pub fn status(&self) -> Result<GameStatus> {
        if self.is_terminal()? {
            Ok(GameStatus::Finished {
                outcome: self.scored.unwrap_or_else(|| self.decide_outcome()),
                score: self.board.count_discs(),
            })
        } else {
            Ok(GameStatus::InProgress { to_move: self.current })
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> Result<&[Player; 2]> {
        self.players_ref()
    }

    pub fn player(&self, seat: Seat) -> Result<&Player> {
        Ok(&self.players_ref()?[seat.index()])
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> Result<&Player> {
        self.player(self.current)
    }

    /// 盤面上の石の数（初期配置の4つを含む）
    pub fn placed_disc_count(&self) -> usize {
        self.placed_discs
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// 現在のスコア（先手, 後手）
    pub fn score(&self) -> (u8, u8) {
        self.board.count_discs()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
