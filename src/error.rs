//! アプリケーション全体のエラー定義モジュール
//! ゲームロジックとAI戦略のエラーを統一管理。

use thiserror::Error;

/// ゲームロジックに関連するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("Players must be set before the board is used")]
    PlayersNotSet,

    #[error("No previous move available to undo")]
    EmptyHistory,
}

impl GameError {
    /// 理由付きのInvalidMoveを生成する
    pub fn invalid_move(reason: impl Into<String>) -> Self {
        GameError::InvalidMove { reason: reason.into() }
    }
}

/// AI戦略に関連するエラー
#[derive(Debug, Error)]
pub enum AIError {
    #[error("No valid moves available")]
    NoValidMoves,

    #[error("Cannot calculate move for finished game")]
    GameFinished,

    #[error("Engine error: {source}")]
    Engine {
        #[from]
        source: GameError,
    },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;
