//! AI戦略の実装モジュール
//! エンジンの問い合わせ操作（合法手、反転数）だけを使って手を選ぶ
//! ランダム戦略と貪欲戦略を統一されたインターフェースで提供する。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AIError;
use crate::game::{GameEngine, Position};

/// AI戦略の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// 合法手からランダムに選ぶ
    Random,
    /// 反転数が最大の手を選ぶ
    Greedy,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

/// AI戦略の共通インターフェース
pub trait AIStrategy: Send {
    /// 現在の局面から手番のプレイヤーの手を選ぶ
    fn calculate_move(&mut self, engine: &GameEngine) -> Result<Position, AIError>;
    /// AIの名前を返す
    fn name(&self) -> &'static str;
}

/// 終局していないことを確認し、合法手を返す
fn candidate_moves(engine: &GameEngine) -> Result<Vec<Position>, AIError> {
    if engine.is_terminal()? {
        return Err(AIError::GameFinished);
    }

    let moves = engine.valid_moves()?;
    if moves.is_empty() {
        return Err(AIError::NoValidMoves);
    }
    Ok(moves)
}

/// ランダムに手を選択するAI実装
pub struct RandomAI {
    rng: fastrand::Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self { rng: fastrand::Rng::new() }
    }

    /// 再現可能な乱数列で作成する
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

impl AIStrategy for RandomAI {
    fn calculate_move(&mut self, engine: &GameEngine) -> Result<Position, AIError> {
        let moves = candidate_moves(engine)?;
        let index = self.rng.usize(..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &'static str {
        "RandomAI"
    }
}

/// 反転数が最も多い手を選ぶAI実装
/// 同数の場合は列が大きい（東側の）手、さらに同じなら行が大きい手を優先する
#[derive(Debug, Clone, Default)]
pub struct GreedyAI;

impl GreedyAI {
    pub fn new() -> Self {
        GreedyAI
    }
}

impl AIStrategy for GreedyAI {
    fn calculate_move(&mut self, engine: &GameEngine) -> Result<Position, AIError> {
        let moves = candidate_moves(engine)?;

        let mut best: Option<(usize, Position)> = None;
        for position in moves {
            let flips = engine.flip_count(position)?;
            let better = match best {
                None => true,
                Some((best_flips, best_pos)) => {
                    (flips, position.col, position.row) > (best_flips, best_pos.col, best_pos.row)
                }
            };
            if better {
                best = Some((flips, position));
            }
        }

        best.map(|(_, position)| position).ok_or(AIError::NoValidMoves)
    }

    fn name(&self) -> &'static str {
        "GreedyAI"
    }
}

/// 種類に応じたAI戦略を生成するファクトリ関数
pub fn create_ai_strategy(kind: StrategyKind, seed: Option<u64>) -> Box<dyn AIStrategy> {
    match kind {
        StrategyKind::Random => match seed {
            Some(seed) => Box::new(RandomAI::with_seed(seed)),
            None => Box::new(RandomAI::new()),
        },
        StrategyKind::Greedy => Box::new(GreedyAI::new()),
    }
}
