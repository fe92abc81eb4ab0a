//! 設定システム統合テスト

use std::{env, fs};
use tempfile::TempDir;

use bomb_reversi::{
    ai::StrategyKind,
    config::{Config, ConfigError, LoggingConfig, RulesConfig, SelfPlayConfig, TiePolicy},
    game::{Disc, GameEngine, Player, Position, Seat},
};

fn create_test_config() -> Config {
    Config {
        rules: RulesConfig {
            bombs_per_player: 1,
            unflippables_per_player: 4,
            tie_policy: TiePolicy::SecondPlayerWins,
        },
        self_play: SelfPlayConfig {
            games: 25,
            first_strategy: StrategyKind::Random,
            second_strategy: StrategyKind::Greedy,
            seed: Some(1234),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            show_board: true,
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("SecondPlayerWins"));
    assert!(json_str.contains("Greedy"));
    assert!(json_str.contains("1234"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized, config);
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("reversi.json");

    let original_config = create_test_config();

    // ファイルに保存
    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    // ファイルから読み込み
    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config, original_config);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // 有効な設定
    assert!(config.validate().is_ok());

    // 無効なゲーム数
    config.self_play.games = 0;
    assert!(config.validate().is_err());

    // 無効な特殊石数
    config.self_play.games = 5;
    config.rules.unflippables_per_player = 33;
    assert!(config.validate().is_err());

    // 無効なログレベル
    config.rules.unflippables_per_player = 2;
    config.logging.level = "verbose".to_string();
    let result = config.validate();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { field, .. }) if field == "logging.level"
    ));
}

/// 環境変数はプロセス全体で共有されるため、読み書きはこのテストだけで行う
#[test]
fn test_env_var_overrides() {
    env::set_var("REVERSI_BOMBS", "5");
    env::set_var("REVERSI_UNFLIPPABLES", "0");
    env::set_var("REVERSI_TIE_POLICY", "second");
    env::set_var("REVERSI_GAMES", "3");
    env::set_var("REVERSI_FIRST_STRATEGY", "random");
    env::set_var("REVERSI_SECOND_STRATEGY", "GREEDY");
    env::set_var("REVERSI_SEED", "99");
    env::set_var("REVERSI_LOG_LEVEL", "warn");

    let config = Config::from_env().unwrap();

    assert_eq!(config.rules.bombs_per_player, 5);
    assert_eq!(config.rules.unflippables_per_player, 0);
    assert_eq!(config.rules.tie_policy, TiePolicy::SecondPlayerWins);
    assert_eq!(config.self_play.games, 3);
    assert_eq!(config.self_play.first_strategy, StrategyKind::Random);
    assert_eq!(config.self_play.second_strategy, StrategyKind::Greedy);
    assert_eq!(config.self_play.seed, Some(99));
    assert_eq!(config.logging.level, "warn");

    // ファイルの値は環境変数で上書きされ、未指定の項目は残る
    let mut from_file = create_test_config();
    env::remove_var("REVERSI_SEED");
    env::remove_var("REVERSI_LOG_LEVEL");
    from_file.apply_env().unwrap();
    assert_eq!(from_file.rules.bombs_per_player, 5);
    assert_eq!(from_file.self_play.seed, Some(1234));
    assert_eq!(from_file.logging.level, "debug");

    // u8に収まらない値
    env::set_var("REVERSI_BOMBS", "300");
    let result = Config::from_env();
    assert!(matches!(
        result,
        Err(ConfigError::EnvVarError { name, .. }) if name == "REVERSI_BOMBS"
    ));
    env::set_var("REVERSI_BOMBS", "2");

    // 未知の引き分けルール
    env::set_var("REVERSI_TIE_POLICY", "coin_flip");
    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::EnvVarError { value, .. }) if value == "coin_flip"));

    // 未知の戦略名
    env::set_var("REVERSI_TIE_POLICY", "none");
    env::set_var("REVERSI_FIRST_STRATEGY", "minimax");
    assert!(Config::from_env().is_err());

    for name in [
        "REVERSI_BOMBS",
        "REVERSI_UNFLIPPABLES",
        "REVERSI_TIE_POLICY",
        "REVERSI_GAMES",
        "REVERSI_FIRST_STRATEGY",
        "REVERSI_SECOND_STRATEGY",
    ] {
        env::remove_var(name);
    }
}

#[test]
fn test_config_error_handling() {
    // 存在しないファイルからの読み込み
    let result = Config::from_file("nonexistent_file.json");
    assert!(matches!(result.unwrap_err(), ConfigError::FileReadError(_)));

    // 無効なJSONファイル
    let temp_dir = TempDir::new().unwrap();
    let invalid_json_path = temp_dir.path().join("invalid.json");
    fs::write(&invalid_json_path, "invalid json content").unwrap();

    let result = Config::from_file(&invalid_json_path);
    assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
}

#[test]
fn test_rules_config_drives_engine() {
    let config = create_test_config();
    let mut engine = GameEngine::with_rules(config.rules.clone());
    engine.set_players(Player::ai("a"), Player::ai("b"));

    assert_eq!(engine.player(Seat::First).unwrap().bombs_remaining(), 1);
    assert_eq!(engine.player(Seat::Second).unwrap().unflippables_remaining(), 4);

    engine
        .apply_move(Position::new(4, 2).unwrap(), Disc::bomb(Seat::First))
        .unwrap();
    engine
        .apply_move(Position::new(3, 2).unwrap(), Disc::simple(Seat::Second))
        .unwrap();

    let position = engine.valid_moves().unwrap()[0];
    assert!(engine.apply_move(position, Disc::bomb(Seat::First)).is_err());
}
