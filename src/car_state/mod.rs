//! # Car state
//!
//! Types describing where the car is, where it is heading, and what it still owes.
//!
//! - [`Dirn`]: committed travel direction of the car.
//! - [`CallDirection`]: direction a hall caller wants to travel.
//! - [`DispatchStatus`]: whether a run loop is active.
//! - [`Bounds`]: serviceable floor range.
//! - [`CarContainer`]: the full mutable state, shared behind one mutex.
//! - [`CarSnapshot`]: read-only copy handed to observers.

pub mod serial;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::elevator_logic::request::RequestQueue;
use crate::error::RequestError;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Direction the car is scanning in. `Idle` means no committed travel direction.
pub enum Dirn {
    Down = -1,
    Idle = 0,
    Up = 1,
}

impl Dirn {
    /// Up becomes Down and the other way around. Idle stays Idle.
    pub fn reversed(self) -> Dirn {
        match self {
            Dirn::Up => Dirn::Down,
            Dirn::Down => Dirn::Up,
            Dirn::Idle => Dirn::Idle,
        }
    }
}

impl fmt::Display for Dirn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dirn::Up => write!(f, "up"),
            Dirn::Down => write!(f, "down"),
            Dirn::Idle => write!(f, "idle"),
        }
    }
}

/// Direction a passenger waiting in the hall wants to go.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallDirection {
    Up,
    Down,
}

impl From<CallDirection> for Dirn {
    fn from(call: CallDirection) -> Self {
        match call {
            CallDirection::Up => Dirn::Up,
            CallDirection::Down => Dirn::Down,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Guard against launching a second run loop.
pub enum DispatchStatus {
    Idle,
    Dispatching,
}

/// Serviceable floor range, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    min: u8,
    max: u8,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: config::DEFAULT_MIN_FLOOR,
            max: config::DEFAULT_MAX_FLOOR,
        }
    }
}

impl Bounds {
    /// Returns `None` when `min > max`.
    pub fn new(min: u8, max: u8) -> Option<Bounds> {
        if min <= max {
            Some(Bounds { min, max })
        } else {
            None
        }
    }

    /// Lowest serviceable floor
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Highest serviceable floor
    pub fn max(&self) -> u8 {
        self.max
    }

    /// True if `floor` can be serviced.
    pub fn contains(&self, floor: u8) -> bool {
        self.min <= floor && floor <= self.max
    }

    /// Validates a requested floor.
    pub fn check(&self, floor: u8) -> Result<u8, RequestError> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(RequestError::InvalidFloorRequest {
                floor,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clamps a signed floor into the range.
    pub fn clamp(&self, floor: i16) -> u8 {
        floor.clamp(self.min as i16, self.max as i16) as u8
    }
}

/// Complete state of the car.
///
/// Shared between the intake calls and the run loop behind a single
/// `tokio::sync::Mutex`, see [`crate::elevator_logic::Elevator`].
#[derive(Debug, Clone)]
pub struct CarContainer {
    /// Static floor range
    pub bounds: Bounds,

    /// Floor the car is at.
    /// Default: [config::START_FLOOR]
    pub floor: u8,

    /// [Dirn]
    /// Default: [Dirn::Idle]
    pub dirn: Dirn,

    /// Whether a run loop is active.
    /// Default: [DispatchStatus::Idle]
    pub status: DispatchStatus,

    /// Pending stops
    pub queue: RequestQueue,

    /// Bumped on every reset. A step resuming under an older epoch drops its commit.
    pub epoch: u64,

    /// Number of run loops launched
    pub dispatch_runs: u32,

    /// Number of run loops that ended in a panic or were cancelled
    pub dispatch_failures: u32,
}

impl CarContainer {
    /// Fresh car parked at `start_floor`, nothing pending.
    ///
    /// `start_floor` is clamped into `bounds`.
    pub fn new(bounds: Bounds, start_floor: u8) -> Self {
        Self {
            bounds,
            floor: bounds.clamp(start_floor as i16),
            dirn: Dirn::Idle,
            status: DispatchStatus::Idle,
            queue: RequestQueue::default(),
            epoch: 0,
            dispatch_runs: 0,
            dispatch_failures: 0,
        }
    }

    /// Read-only copy for observers.
    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            floor: self.floor,
            direction: self.dirn,
            status: self.status,
            up_stops: self.queue.up_floors().collect(),
            down_stops: self.queue.down_floors().collect(),
            dispatch_runs: self.dispatch_runs,
            dispatch_failures: self.dispatch_failures,
        }
    }
}

impl Default for CarContainer {
    fn default() -> Self {
        Self::new(Bounds::default(), config::START_FLOOR)
    }
}

/// Point-in-time copy of the car, used by the console and the scenario scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSnapshot {
    /// current floor
    pub floor: u8,
    /// current direction
    pub direction: Dirn,
    /// run loop status
    pub status: DispatchStatus,
    /// pending up stops, ascending
    pub up_stops: Vec<u8>,
    /// pending down stops, descending
    pub down_stops: Vec<u8>,
    /// run loops launched so far
    pub dispatch_runs: u32,
    /// run loops lost to a panic or cancellation
    pub dispatch_failures: u32,
}

impl CarSnapshot {
    /// True if any stop is still owed.
    pub fn has_pending_requests(&self) -> bool {
        !self.up_stops.is_empty() || !self.down_stops.is_empty()
    }
}
