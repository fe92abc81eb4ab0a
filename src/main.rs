//! ボム・リバーシ自己対戦ランナーのエントリポイント
//! 設定読み込み、ログ初期化、AI同士の対戦と結果集計を行う。

use bomb_reversi::{
    ai::{create_ai_strategy, play_game},
    config::Config,
    game::{GameEngine, GameOutcome, GameStatus, Player, Seat},
};

fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    let level = config.log_level().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    println!("設定読み込み完了:");
    println!(
        "  特殊石: ボム{}個 / 反転不可{}個",
        config.rules.bombs_per_player, config.rules.unflippables_per_player
    );
    println!("  引き分け: {:?}", config.rules.tie_policy);
    println!(
        "  対戦: {:?} vs {:?} x {}ゲーム",
        config.self_play.first_strategy, config.self_play.second_strategy, config.self_play.games
    );

    let seed = config.self_play.seed;
    let mut first_ai = create_ai_strategy(config.self_play.first_strategy, seed);
    let mut second_ai = create_ai_strategy(
        config.self_play.second_strategy,
        seed.map(|s| s.wrapping_add(1)),
    );

    let mut engine = GameEngine::with_rules(config.rules.clone());
    engine.set_players(Player::ai(first_ai.name()), Player::ai(second_ai.name()));

    let mut draws = 0;
    for game in 1..=config.self_play.games {
        if game > 1 {
            if let Err(e) = engine.reset() {
                eprintln!("ゲーム初期化失敗: {}", e);
                std::process::exit(1);
            }
        }

        let status = match play_game(&mut engine, first_ai.as_mut(), second_ai.as_mut()) {
            Ok(status) => status,
            Err(e) => {
                eprintln!("ゲーム{}でエラー: {}", game, e);
                std::process::exit(1);
            }
        };

        if let GameStatus::Finished { outcome, score } = status {
            let result = match outcome {
                GameOutcome::Winner(Seat::First) => "先手勝ち",
                GameOutcome::Winner(Seat::Second) => "後手勝ち",
                GameOutcome::Draw => {
                    draws += 1;
                    "引き分け"
                }
            };
            println!("ゲーム{:>3}: {} ({} - {})", game, result, score.0, score.1);
        }

        if config.logging.show_board {
            println!("{}", engine.board().display());
        }
    }

    if let Ok([first, second]) = engine.players() {
        println!("結果:");
        println!("  {} (先手): {}勝", first.name(), first.wins());
        println!("  {} (後手): {}勝", second.name(), second.wins());
        println!("  引き分け: {}", draws);
    }
}
