//! Parsing of console lines into [`Command`]s.
//!
//! Tokens are split on whitespace and matched case-insensitively. Floors are checked
//! against the configured bounds here, so an out-of-range floor never reaches the car.

use thiserror::Error;

use crate::car_state::{Bounds, CallDirection};

/// Number of canned scenarios available through `test <n>`
pub const SCENARIO_COUNT: u8 = 4;

/// One console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `hall <floor> <up|down>`
    Hall {
        /// floor the call is made from
        floor: u8,
        /// direction the caller wants to go
        call: CallDirection,
    },
    /// `car <floor>`
    Car {
        /// destination floor
        floor: u8,
    },
    /// `test <1..4>`
    Test(u8),
    /// `status` or `status json`
    Status {
        /// print the snapshot as JSON instead of the table
        json: bool,
    },
    /// `reset [floor]`
    Reset(Option<u8>),
    /// `help`
    Help,
    /// `exit`
    Exit,
}

/// A console line that could not be turned into a command.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command. Type 'help' to see options.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid floor '{token}', expected {min}..={max}.")]
    InvalidFloor { token: String, min: u8, max: u8 },
    #[error("Direction must be 'up' or 'down', got '{0}'.")]
    InvalidDirectionToken(String),
    #[error("Usage: test <1|2|3|4>")]
    InvalidScenario(String),
}

/// Help text printed by `help`
pub const HELP: &str = "Commands:
  hall <floor> <up|down>   - hall call at a floor
  car <floor>              - car call to a floor
  test <1|2|3|4>           - run a predefined scenario
  status [json]            - show the car
  reset [floor]            - clear all requests and park the car
  help
  exit";

fn parse_floor(token: &str, bounds: Bounds) -> Result<u8, CommandError> {
    let invalid = || CommandError::InvalidFloor {
        token: token.to_string(),
        min: bounds.min(),
        max: bounds.max(),
    };
    let floor: u8 = token.parse().map_err(|_| invalid())?;
    if bounds.contains(floor) {
        Ok(floor)
    } else {
        Err(invalid())
    }
}

fn parse_direction(token: &str) -> Result<CallDirection, CommandError> {
    match token.to_lowercase().as_str() {
        "up" => Ok(CallDirection::Up),
        "down" => Ok(CallDirection::Down),
        _ => Err(CommandError::InvalidDirectionToken(token.to_string())),
    }
}

/// Parses one console line. Blank lines give `Ok(None)`.
pub fn parse(line: &str, bounds: Bounds) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Ok(None);
    };

    let cmd = match first.to_lowercase().as_str() {
        "help" => Command::Help,
        "exit" => Command::Exit,
        "hall" => {
            if parts.len() < 3 {
                return Err(CommandError::Usage("hall <floor> <up|down>"));
            }
            let floor = parse_floor(parts[1], bounds)?;
            let call = parse_direction(parts[2])?;
            Command::Hall { floor, call }
        }
        "car" => {
            if parts.len() < 2 {
                return Err(CommandError::Usage("car <floor>"));
            }
            Command::Car { floor: parse_floor(parts[1], bounds)? }
        }
        "test" => {
            let token = parts.get(1).copied().unwrap_or_default();
            match token.parse::<u8>() {
                Ok(n) if (1..=SCENARIO_COUNT).contains(&n) => Command::Test(n),
                _ => return Err(CommandError::InvalidScenario(token.to_string())),
            }
        }
        "status" => match parts.get(1).map(|s| s.to_lowercase()) {
            None => Command::Status { json: false },
            Some(arg) if arg == "json" => Command::Status { json: true },
            Some(_) => return Err(CommandError::Usage("status [json]")),
        },
        "reset" => match parts.get(1) {
            None => Command::Reset(None),
            Some(token) => Command::Reset(Some(parse_floor(token, bounds)?)),
        },
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}
