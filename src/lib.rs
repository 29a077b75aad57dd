#![warn(missing_docs)]
//! # This projects library
//!
//! This library runs a single elevator car with a scan (LOOK) dispatcher, and a console to talk to it.
//!
//! ## Overview
//! - **Config**: Handles configuration settings.
//! - **Init**: Program arguments and start-up.
//! - **Car state**: Where the car is and what it still owes.
//! - **Elevator Logic**: Request intake, the pending-stop queue and the run loop.
//! - **Console**: Command parsing and the canned test scenarios.

/// Global variables
pub mod config;

/// Error types of the request intake
pub mod error;

/// Initialize functions
pub mod init;

/// Print functions with color coding
pub mod print;

pub mod car_state;

pub mod elevator_logic;

pub mod console;
