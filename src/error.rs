//! Errors returned by the intake boundary of the car.
//!
//! The dispatcher itself has no failure states once a request is accepted,
//! "nothing pending" is the normal end of a run loop and not an error.

use thiserror::Error;

/// A request the car refuses to take.
///
/// A rejected request is dropped before any queue or direction change,
/// the caller gets the error back and decides what to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The floor lies outside `[min, max]`.
    #[error("floor {floor} is outside the serviceable range {min}..={max}")]
    InvalidFloorRequest {
        /// requested floor
        floor: u8,
        /// lowest serviceable floor
        min: u8,
        /// highest serviceable floor
        max: u8,
    },
}
