//! Movement clock used by the dispatcher.
//!
//! The run loop suspends at exactly two points: between floors (travel) and while
//! the doors are open (dwell). Both are delegated to a [`MovementClock`], so the
//! dispatcher never sleeps on its own.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use crate::config;

/// Source of the two delays the dispatcher waits on.
pub trait MovementClock: Send + Sync {
    /// Time to move one floor.
    fn await_travel(&self) -> BoxFuture<'_, ()>;

    /// Time the doors stay open at a stop.
    fn await_dwell(&self) -> BoxFuture<'_, ()>;
}

/// Clock backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    travel: Duration,
    dwell: Duration,
}

impl TokioClock {
    /// Clock with the given per-floor and door delays.
    pub fn new(travel: Duration, dwell: Duration) -> Self {
        Self { travel, dwell }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new(config::TRAVEL_TIME, config::DWELL_TIME)
    }
}

impl MovementClock for TokioClock {
    fn await_travel(&self) -> BoxFuture<'_, ()> {
        tokio::time::sleep(self.travel).boxed()
    }

    fn await_dwell(&self) -> BoxFuture<'_, ()> {
        tokio::time::sleep(self.dwell).boxed()
    }
}

/// Clock that resolves at once, only yielding to the scheduler.
///
/// Counts how often each delay was requested.
#[derive(Debug, Default)]
pub struct InstantClock {
    travels: AtomicUsize,
    dwells: AtomicUsize,
}

impl InstantClock {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of floor transitions waited for
    pub fn travels(&self) -> usize {
        self.travels.load(Ordering::SeqCst)
    }

    /// Number of door openings waited for
    pub fn dwells(&self) -> usize {
        self.dwells.load(Ordering::SeqCst)
    }
}

impl MovementClock for InstantClock {
    fn await_travel(&self) -> BoxFuture<'_, ()> {
        self.travels.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().boxed()
    }

    fn await_dwell(&self) -> BoxFuture<'_, ()> {
        self.dwells.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_waits_configured_time() {
        let clock = TokioClock::new(Duration::from_secs(1), Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        clock.await_travel().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        clock.await_dwell().await;
        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test]
    async fn instant_clock_counts() {
        let clock = InstantClock::new();
        clock.await_travel().await;
        clock.await_travel().await;
        clock.await_dwell().await;
        assert_eq!(clock.travels(), 2);
        assert_eq!(clock.dwells(), 1);
    }
}
