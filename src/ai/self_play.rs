//! AI同士の自己対戦モジュール
//! 両座席の戦略に交互に手を選ばせ、終局まで進める。

use crate::error::AIError;
use crate::game::{Disc, GameEngine, GameStatus};

use super::strategies::AIStrategy;

/// 1ゲームを終局まで進め、最終状態を返す
/// 終局時の勝利数の加算はエンジンが1度だけ行う
pub fn play_game<'a>(
    engine: &mut GameEngine,
    first: &'a mut dyn AIStrategy,
    second: &'a mut dyn AIStrategy,
) -> Result<GameStatus, AIError> {
    while !engine.is_game_finished()? {
        let ai = if engine.is_first_player_turn() { &mut *first } else { &mut *second };
        let position = ai.calculate_move(engine)?;
        engine.apply_move(position, Disc::simple(engine.current_seat()))?;
    }
    Ok(engine.status()?)
}
