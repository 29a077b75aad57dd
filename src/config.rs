//! # config.rs – Centralized Parameter Store
//!
//! This module holds all static program parameters used throughout the system.
//! Keeping configuration in one place makes tuning, experimentation, and testing easier.
//!
//! Most of these are defaults. Bounds and timing can be overridden at start-up,
//! see [`crate::init::parse_args`].

use std::sync::Mutex;
use std::time::Duration;
use once_cell::sync::Lazy;

//
// ──────────────────────────────────────────────────────────────
//   1. BUILDING & CAR PARAMETERS
// ──────────────────────────────────────────────────────────────
//

/// Lowest serviceable floor
pub const DEFAULT_MIN_FLOOR: u8 = 0;

/// Highest serviceable floor
pub const DEFAULT_MAX_FLOOR: u8 = 10;

/// Floor the car is parked at when the program starts
pub const START_FLOOR: u8 = 0;

//
// ──────────────────────────────────────────────────────────────
//   2. TIMING & TIMEOUTS & INTERVALS
// ──────────────────────────────────────────────────────────────
//

/// Time used to travel between two adjacent floors
pub const TRAVEL_TIME: Duration = Duration::from_secs(1);

/// Time the doors stay open while a stop is serviced
pub const DWELL_TIME: Duration = Duration::from_secs(3);

/// General polling period (console input, idle waiting, scenario waits)
pub const POLL_PERIOD: Duration = Duration::from_millis(50);

/// Scenario wait: ground floor pickup
pub const SCENARIO_SHORT_WAIT: Duration = Duration::from_millis(15000);

/// Scenario wait: pickup a few floors away
pub const SCENARIO_WAIT: Duration = Duration::from_millis(25000);

/// Scenario wait: pickup after servicing the other direction
pub const SCENARIO_LONG_WAIT: Duration = Duration::from_millis(35000);

/// Scenario wait: full sweep to the top floor
pub const SCENARIO_SWEEP_WAIT: Duration = Duration::from_millis(40000);

/// Scenario wait: return leg after a full sweep
pub const SCENARIO_RETURN_WAIT: Duration = Duration::from_millis(30000);

//
// ──────────────────────────────────────────────────────────────
//   3. LOGGING CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Enable/disable printing of car movement and door events
pub static PRINT_CAR_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of errors
pub static PRINT_ERR_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of warnings
pub static PRINT_WARN_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of success messages
pub static PRINT_OK_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of general info
pub static PRINT_INFO_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable miscellaneous prints
pub static PRINT_ELSE_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Sets a print toggle. A poisoned toggle is recovered, the flag is plain data.
pub fn set_print(flag: &Mutex<bool>, on: bool) {
    match flag.lock() {
        Ok(mut guard) => *guard = on,
        Err(poisoned) => *poisoned.into_inner() = on,
    }
}

/// Reads a print toggle.
pub fn print_enabled(flag: &Mutex<bool>) -> bool {
    match flag.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
