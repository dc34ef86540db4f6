//! Digital-signal handles.
//!
//! A [`Line`] is one named logic-level signal.  Handles are cheap clones
//! sharing the same underlying level; wiring a transmitter's output straight
//! into a receiver's input is just passing two clones of one line.
//!
//! The line supplies every suspension primitive the transceiver needs:
//! - `drive` / `level` — set or read the instantaneous logic level,
//! - `rising_edge` / `falling_edge` — suspend until the line transitions,
//! - [`Line::tick`] — race a time window against both edge directions and
//!   report which condition fired first.
//!
//! Edge waits observe only transitions that occur while the waiter is
//! registered; a transition that happened before the call is never reported
//! retroactively.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Which condition ended a [`Line::tick`] race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// The full window elapsed without a transition.
    Elapsed,
    /// The level transitioned high → low.
    Fell,
    /// The level transitioned low → high.
    Rose,
}

/// A named digital signal.
///
/// All methods take `&self`; clone the handle freely to share one line
/// between tasks.
#[derive(Debug, Clone)]
pub struct Line {
    name: Arc<str>,
    level: Arc<watch::Sender<bool>>,
}

impl Line {
    /// Create a line resting at `initial` level.
    pub fn new(name: &str, initial: bool) -> Self {
        let (level, _) = watch::channel(initial);
        Self {
            name: Arc::from(name),
            level: Arc::new(level),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current logic level.
    pub fn level(&self) -> bool {
        *self.level.borrow()
    }

    /// Drive the line to `level`.
    ///
    /// Waiters see an edge only when the value actually changes; re-driving
    /// the current level is invisible to them.
    pub fn drive(&self, level: bool) {
        self.level.send_replace(level);
    }

    /// Suspend until the level transitions low → high.
    pub async fn rising_edge(&self) {
        self.edge(true).await
    }

    /// Suspend until the level transitions high → low.
    pub async fn falling_edge(&self) {
        self.edge(false).await
    }

    async fn edge(&self, target: bool) {
        let mut rx = self.level.subscribe();
        let mut prev = *rx.borrow_and_update();
        while rx.changed().await.is_ok() {
            let now = *rx.borrow_and_update();
            let fired = now != prev && now == target;
            prev = now;
            if fired {
                return;
            }
        }
        // Every handle holds the sender, so the channel only closes once no
        // driver exists; a line nobody can drive never transitions again.
        std::future::pending::<()>().await;
    }

    /// Race one time window against both edge directions.
    ///
    /// Resumes on whichever fires first and reports which one it was.  The
    /// decode loop uses this as its per-bit clocking tick.
    pub async fn tick(&self, window: Duration) -> LineEvent {
        tokio::select! {
            biased;
            _ = self.falling_edge() => LineEvent::Fell,
            _ = self.rising_edge() => LineEvent::Rose,
            _ = tokio::time::sleep(window) => LineEvent::Elapsed,
        }
    }
}

/// Drive `line` as a free-running square wave with the given full period.
///
/// Stands in for the host simulator's clock generator; the transceiver only
/// consumes one rising edge of it, at startup.
pub fn spawn_clock(line: Line, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let half = period / 2;
        loop {
            tokio::time::sleep(half).await;
            line.drive(!line.level());
        }
    })
}
