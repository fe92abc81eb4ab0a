pub mod self_play;
pub mod strategies;

pub use self_play::*;
pub use strategies::*;
