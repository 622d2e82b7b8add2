pub mod mode;
pub mod player;

pub use mode::{GameMode, ModeSelection};
pub use player::PlayerRecord;
