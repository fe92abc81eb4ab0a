pub mod game;
pub mod ai;
pub mod error;
pub mod config;

pub use error::{GameError, AIError, Result};
pub use config::{Config, RulesConfig, TiePolicy};
