//! Client engine for the MK World MMR stream overlay: cached lounge
//! lookups plus the rotating multi-stat badge.

pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod overlay;
pub mod session;

pub use cache::{ResponseCache, CACHE_TTL};
pub use client::{LoungeClient, LOUNGE_BASE_URL};
pub use error::OverlayError;
pub use models::{GameMode, ModeSelection, PlayerRecord};
pub use overlay::cycle::{CycleScheduler, CYCLE_PERIOD};
pub use overlay::field::{FieldSelection, StatField};
pub use overlay::slides::{compose, DiffColor, Slide};
pub use overlay::{OverlayEngine, RefreshOutcome, AUTO_REFRESH_PERIOD};
pub use session::OverlaySession;
