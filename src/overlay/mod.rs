pub mod cycle;
pub mod field;
pub mod slides;

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::client::LoungeClient;
use crate::error::OverlayError;
use crate::models::{GameMode, ModeSelection, PlayerRecord};
use crate::session::OverlaySession;
use cycle::CycleScheduler;
use slides::{compose, Slide};

/// How often an overlay re-fetches the displayed player.
pub const AUTO_REFRESH_PERIOD: Duration = Duration::from_millis(60_000);

/// Result of one refresh round, tagged with the session epoch it was
/// started under so a stale round can be recognized and dropped.
pub struct RefreshOutcome {
    epoch: u64,
    primary: Option<Result<PlayerRecord, OverlayError>>,
    secondary: Option<Result<PlayerRecord, OverlayError>>,
}

/// Client-side state behind one overlay badge: the active session, the
/// last good records, the composed slide rotation, and its scheduler.
pub struct OverlayEngine {
    client: LoungeClient,
    session: Option<OverlaySession>,
    epoch: u64,
    primary: Option<PlayerRecord>,
    secondary: Option<PlayerRecord>,
    error: Option<String>,
    slides: Vec<Slide>,
    scheduler: CycleScheduler,
}

impl OverlayEngine {
    pub fn new(client: LoungeClient) -> Self {
        Self {
            client,
            session: None,
            epoch: 0,
            primary: None,
            secondary: None,
            error: None,
            slides: Vec::new(),
            scheduler: CycleScheduler::new(),
        }
    }

    /// Point the overlay at a new player/mode/field selection. Clears
    /// records and slides and resets the rotation immediately; a
    /// refresh still in flight for the previous session is ignored
    /// when it resolves.
    pub fn set_session(&mut self, session: OverlaySession) {
        self.epoch += 1;
        self.session = Some(session);
        self.primary = None;
        self.secondary = None;
        self.error = None;
        self.slides.clear();
        self.scheduler.reset();
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    /// Start a refresh round for the current session. The returned
    /// future borrows nothing from the engine, so the session can
    /// change while it runs; `apply_refresh` drops the result if it
    /// has. Under "both" the two lookups run concurrently and may
    /// resolve in either order.
    pub fn begin_refresh(&self) -> Option<impl Future<Output = RefreshOutcome>> {
        let session = self.session.clone()?;
        let client = self.client.clone();
        let epoch = self.epoch;

        Some(async move {
            match session.mode {
                ModeSelection::Single(mode) => {
                    let primary = client.player_details(&session.name, mode).await;
                    RefreshOutcome {
                        epoch,
                        primary: Some(primary),
                        secondary: None,
                    }
                }
                ModeSelection::Both => {
                    let (primary, secondary) = tokio::join!(
                        client.player_details(&session.name, GameMode::TwentyFour),
                        client.player_details(&session.name, GameMode::Twelve),
                    );
                    RefreshOutcome {
                        epoch,
                        primary: Some(primary),
                        secondary: Some(secondary),
                    }
                }
            }
        })
    }

    /// Fold a finished refresh round back in and rebuild the rotation.
    /// A round started under an older session is discarded untouched.
    /// Failed lookups keep the previous record for their queue on
    /// screen; the first failure message is recorded and returned.
    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) -> Result<(), OverlayError> {
        if outcome.epoch != self.epoch {
            debug!("discarding stale refresh round");
            return Ok(());
        }

        let mut failure: Option<OverlayError> = None;
        if let Some(result) = outcome.primary {
            match result {
                Ok(record) => self.primary = Some(record),
                Err(err) => failure = Some(err),
            }
        }
        if let Some(result) = outcome.secondary {
            match result {
                Ok(record) => self.secondary = Some(record),
                Err(err) => {
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }

        self.error = failure.as_ref().map(|err| err.to_string());
        self.rebuild();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Convenience wrapper: one full refresh round.
    pub async fn refresh(&mut self) -> Result<(), OverlayError> {
        match self.begin_refresh() {
            Some(round) => {
                let outcome = round.await;
                self.apply_refresh(outcome)
            }
            None => Ok(()),
        }
    }

    fn rebuild(&mut self) {
        self.slides = match &self.session {
            Some(session) => compose(
                self.primary.as_ref(),
                self.secondary.as_ref(),
                session.mode,
                &session.fields,
            ),
            None => Vec::new(),
        };
        self.scheduler.restart(self.slides.len());
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.scheduler.index())
    }

    pub fn is_cycling(&self) -> bool {
        self.scheduler.is_cycling()
    }

    pub fn scheduler(&self) -> &CycleScheduler {
        &self.scheduler
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Badge text when the rotation is idle: the primary rating, or
    /// "Error" before any good data has arrived, or "N/A".
    pub fn static_value(&self) -> String {
        match self.primary.as_ref().and_then(|r| r.mmr) {
            Some(mmr) => (mmr.round() as i64).to_string(),
            None if self.primary.is_none() && self.error.is_some() => "Error".to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::field::{FieldSelection, StatField};

    fn engine() -> OverlayEngine {
        // Never dialed in these tests.
        let client = LoungeClient::with_base_url("http://127.0.0.1:9").unwrap();
        OverlayEngine::new(client)
    }

    fn session(mode: ModeSelection, fields: FieldSelection) -> OverlaySession {
        OverlaySession::new("Funky", mode, fields)
    }

    fn record(mmr: f64) -> PlayerRecord {
        PlayerRecord {
            name: "Funky".to_string(),
            mmr: Some(mmr),
            rank: "Gold 2".to_string(),
            ..PlayerRecord::default()
        }
    }

    fn success(epoch: u64, primary: PlayerRecord) -> RefreshOutcome {
        RefreshOutcome {
            epoch,
            primary: Some(Ok(primary)),
            secondary: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn applied_refresh_builds_slides_and_starts_rotation() {
        let mut engine = engine();
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            [StatField::WinRate].into_iter().collect(),
        ));

        engine.apply_refresh(success(engine.epoch, record(1500.0))).unwrap();

        assert_eq!(engine.slides().len(), 2);
        assert!(engine.is_cycling());
        assert_eq!(engine.current_slide().unwrap().value, "1500");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_refresh_round_is_discarded() {
        let mut engine = engine();
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            FieldSelection::new(),
        ));
        let stale = success(engine.epoch, record(1500.0));

        // The user switches players before the lookup resolves.
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            FieldSelection::new(),
        ));

        engine.apply_refresh(stale).unwrap();
        assert!(engine.slides().is_empty());
        assert!(engine.current_slide().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn set_session_resets_rotation_immediately() {
        let mut engine = engine();
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            [StatField::WinRate].into_iter().collect(),
        ));
        engine.apply_refresh(success(engine.epoch, record(1500.0))).unwrap();
        assert!(engine.is_cycling());

        engine.set_session(session(ModeSelection::Both, FieldSelection::new()));
        assert!(!engine.is_cycling());
        assert!(engine.slides().is_empty());
        assert_eq!(engine.scheduler().index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_last_good_slides() {
        let mut engine = engine();
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            FieldSelection::new(),
        ));
        engine.apply_refresh(success(engine.epoch, record(1500.0))).unwrap();

        let failed = RefreshOutcome {
            epoch: engine.epoch,
            primary: Some(Err(OverlayError::Upstream("Player not found".into()))),
            secondary: None,
        };
        let err = engine.apply_refresh(failed).unwrap_err();

        assert_eq!(err.to_string(), "Player not found");
        assert_eq!(engine.last_error(), Some("Player not found"));
        assert_eq!(engine.slides().len(), 1);
        assert_eq!(engine.slides()[0].value, "1500");
    }

    #[tokio::test(start_paused = true)]
    async fn both_mode_partial_failure_shows_other_queue_as_absent() {
        let mut engine = engine();
        engine.set_session(session(ModeSelection::Both, FieldSelection::new()));

        let outcome = RefreshOutcome {
            epoch: engine.epoch,
            primary: Some(Ok(record(1500.0))),
            secondary: Some(Err(OverlayError::Upstream("HTTP 500".into()))),
        };
        engine.apply_refresh(outcome).unwrap_err();

        let slides = engine.slides();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].value, "1500");
        assert_eq!(slides[1].value, "N/A");
        assert_eq!(engine.last_error(), Some("HTTP 500"));
    }

    #[tokio::test(start_paused = true)]
    async fn static_value_tracks_error_state() {
        let mut engine = engine();
        engine.set_session(session(
            ModeSelection::Single(GameMode::TwentyFour),
            FieldSelection::new(),
        ));
        assert_eq!(engine.static_value(), "N/A");

        let failed = RefreshOutcome {
            epoch: engine.epoch,
            primary: Some(Err(OverlayError::Upstream("down".into()))),
            secondary: None,
        };
        engine.apply_refresh(failed).unwrap_err();
        assert_eq!(engine.static_value(), "Error");

        engine.apply_refresh(success(engine.epoch, record(1499.6))).unwrap();
        assert_eq!(engine.static_value(), "1500");
    }
}
