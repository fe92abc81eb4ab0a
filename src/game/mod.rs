pub mod types;
pub mod board;
pub mod player;
pub mod rules;
pub mod history;
pub mod engine;

pub use types::*;
pub use board::*;
pub use player::*;
pub use rules::*;
pub use history::*;
pub use engine::*;
