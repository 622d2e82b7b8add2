use std::fmt;

use serde::{Deserialize, Serialize};

/// Lounge queue a rating belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// 24-player races, the default queue.
    #[serde(rename = "24p")]
    TwentyFour,
    /// 12-player races.
    #[serde(rename = "12p")]
    Twelve,
}

impl GameMode {
    pub const DEFAULT: GameMode = GameMode::TwentyFour;

    pub fn tag(self) -> &'static str {
        match self {
            GameMode::TwentyFour => "24p",
            GameMode::Twelve => "12p",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "24p" => Some(GameMode::TwentyFour),
            "12p" => Some(GameMode::Twelve),
            _ => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which queues the overlay tracks: one of them, or both side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeSelection {
    Single(GameMode),
    Both,
}

impl ModeSelection {
    /// Active queues in activation order. 24p always comes first.
    pub fn active_modes(self) -> &'static [GameMode] {
        match self {
            ModeSelection::Single(GameMode::TwentyFour) => &[GameMode::TwentyFour],
            ModeSelection::Single(GameMode::Twelve) => &[GameMode::Twelve],
            ModeSelection::Both => &[GameMode::TwentyFour, GameMode::Twelve],
        }
    }

    pub fn is_both(self) -> bool {
        matches!(self, ModeSelection::Both)
    }

    pub fn tag(self) -> &'static str {
        match self {
            ModeSelection::Single(mode) => mode.tag(),
            ModeSelection::Both => "both",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "both" => Some(ModeSelection::Both),
            other => GameMode::from_tag(other).map(ModeSelection::Single),
        }
    }
}

impl fmt::Display for ModeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
