use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Period between slide advances.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(4_000);

/// Drives the badge rotation. Idle below two slides; otherwise a fixed
/// timer advances `(index + 1) % len` until the sequence changes or the
/// scheduler is dropped.
pub struct CycleScheduler {
    len: usize,
    index_tx: watch::Sender<usize>,
    index_rx: watch::Receiver<usize>,
    timer: Option<JoinHandle<()>>,
}

impl CycleScheduler {
    pub fn new() -> Self {
        let (index_tx, index_rx) = watch::channel(0);
        Self {
            len: 0,
            index_tx,
            index_rx,
            timer: None,
        }
    }

    /// Adopt a rebuilt slide sequence. Cancels any running timer and
    /// resets the index to 0 unconditionally, then starts rotating
    /// again if the sequence has at least two slides.
    pub fn restart(&mut self, len: usize) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.len = len;
        self.index_tx.send_replace(0);
        if len < 2 {
            return;
        }

        let mut interval = time::interval_at(Instant::now() + CYCLE_PERIOD, CYCLE_PERIOD);
        let index_tx = self.index_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            loop {
                interval.tick().await;
                index_tx.send_modify(|index| *index = (*index + 1) % len);
            }
        }));
    }

    /// Stop rotating and forget the sequence.
    pub fn reset(&mut self) {
        self.restart(0);
    }

    pub fn index(&self) -> usize {
        *self.index_rx.borrow()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_cycling(&self) -> bool {
        self.len > 1
    }

    /// Watch the index from a renderer task. The receiver survives
    /// restarts.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index_rx.clone()
    }
}

impl Default for CycleScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CycleScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
