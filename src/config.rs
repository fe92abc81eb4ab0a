//! アプリケーション設定管理モジュール
//! ルール（特殊石の数、引き分けの扱い）、自己対戦、ログの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, str::FromStr};

use crate::ai::strategies::StrategyKind;
use crate::game::player::{SpecialAllowance, DEFAULT_BOMBS, DEFAULT_UNFLIPPABLES};

/// 1人あたりの特殊石数の上限（盤面のマス数の半分）
pub const MAX_SPECIAL_DISCS: u8 = 32;

/// 石数が同数で終局したときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiePolicy {
    /// 勝者なし（どちらの勝利数も増えない）
    NoWinner,
    /// 後手の勝ち
    SecondPlayerWins,
}

/// ゲームルールの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub bombs_per_player: u8,
    pub unflippables_per_player: u8,
    pub tie_policy: TiePolicy,
}

impl RulesConfig {
    /// ゲーム開始時に各プレイヤーへ配る特殊石の残数
    pub fn starting_allowance(&self) -> SpecialAllowance {
        SpecialAllowance {
            bombs: self.bombs_per_player,
            unflippables: self.unflippables_per_player,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            bombs_per_player: DEFAULT_BOMBS,
            unflippables_per_player: DEFAULT_UNFLIPPABLES,
            tie_policy: TiePolicy::NoWinner,
        }
    }
}

/// AI同士の自己対戦の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    pub games: u32,
    pub first_strategy: StrategyKind,
    pub second_strategy: StrategyKind,
    /// 乱数シード（未指定なら毎回異なる）
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            first_strategy: StrategyKind::Greedy,
            second_strategy: StrategyKind::Random,
            seed: None,
        }
    }
}

/// ログ出力の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracingのログレベル（trace, debug, info, warn, error）
    pub level: String,
    /// 各ゲーム終了時に盤面を表示するか
    pub show_board: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_board: false,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub rules: RulesConfig,
    pub self_play: SelfPlayConfig,
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// 環境変数を読み、設定されていればパースして返す
fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarError {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 既存の設定を環境変数で上書きする
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(bombs) = parse_env("REVERSI_BOMBS")? {
            self.rules.bombs_per_player = bombs;
        }

        if let Some(unflippables) = parse_env("REVERSI_UNFLIPPABLES")? {
            self.rules.unflippables_per_player = unflippables;
        }

        if let Ok(policy) = env::var("REVERSI_TIE_POLICY") {
            self.rules.tie_policy = match policy.to_lowercase().as_str() {
                "none" | "no_winner" => TiePolicy::NoWinner,
                "second" | "second_player_wins" => TiePolicy::SecondPlayerWins,
                _ => {
                    return Err(ConfigError::EnvVarError {
                        name: "REVERSI_TIE_POLICY".to_string(),
                        value: policy,
                    })
                }
            };
        }

        if let Some(games) = parse_env("REVERSI_GAMES")? {
            self.self_play.games = games;
        }

        if let Some(strategy) = parse_env("REVERSI_FIRST_STRATEGY")? {
            self.self_play.first_strategy = strategy;
        }

        if let Some(strategy) = parse_env("REVERSI_SECOND_STRATEGY")? {
            self.self_play.second_strategy = strategy;
        }

        if let Some(seed) = parse_env("REVERSI_SEED")? {
            self.self_play.seed = Some(seed);
        }

        if let Ok(level) = env::var("REVERSI_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("config.json")
            .or_else(|_| Self::from_file("config/reversi.json"))
            .unwrap_or_default();

        // 環境変数で設定を上書き
        config.apply_env()?;
        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.bombs_per_player > MAX_SPECIAL_DISCS {
            return Err(ConfigError::InvalidValue {
                field: "rules.bombs_per_player".to_string(),
                value: self.rules.bombs_per_player.to_string(),
            });
        }

        if self.rules.unflippables_per_player > MAX_SPECIAL_DISCS {
            return Err(ConfigError::InvalidValue {
                field: "rules.unflippables_per_player".to_string(),
                value: self.rules.unflippables_per_player.to_string(),
            });
        }

        if self.self_play.games == 0 {
            return Err(ConfigError::InvalidValue {
                field: "self_play.games".to_string(),
                value: self.self_play.games.to_string(),
            });
        }

        if self.log_level().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        Ok(())
    }

    /// ログレベル文字列をtracingのLevelに変換する
    pub fn log_level(&self) -> Option<tracing::Level> {
        tracing::Level::from_str(&self.logging.level).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.rules.starting_allowance(), SpecialAllowance::default());
        assert_eq!(config.rules.tie_policy, TiePolicy::NoWinner);
        assert_eq!(config.log_level(), Some(tracing::Level::INFO));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.self_play.games = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        let mut config = Config::default();
        config.rules.bombs_per_player = 40;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
