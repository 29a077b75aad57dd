//! Start-up: program arguments and construction of the car.

use std::{env, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context};

use crate::{
    car_state::Bounds,
    config,
    elevator_logic::{timer::TokioClock, Elevator},
};

/// Everything the program arguments can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Serviceable floor range
    pub bounds: Bounds,
    /// Time to move one floor
    pub travel: Duration,
    /// Time the doors stay open
    pub dwell: Duration,
    /// `help` was given, print [HELP] and quit
    pub show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            travel: config::TRAVEL_TIME,
            dwell: config::DWELL_TIME,
            show_help: false,
        }
    }
}

/// Text printed for the `help` argument
pub const HELP: &str = "Available arguments:
  min_floor::<n>           lowest floor (default 0)
  max_floor::<n>           highest floor (default 10)
  travel_ms::<ms>          time per floor (default 1000)
  dwell_ms::<ms>           door time (default 3000)
  print_car::true/false
  print_err::true/false
  print_warn::true/false
  print_ok::true/false
  print_info::true/false
  print_else::true/false
  debug                    only error messages are shown
  help";

fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("{} expects true or false, got '{}'", key, value),
    }
}

fn debug_mode() {
    config::set_print(&config::PRINT_CAR_ON, false);
    config::set_print(&config::PRINT_WARN_ON, false);
    config::set_print(&config::PRINT_OK_ON, false);
    config::set_print(&config::PRINT_INFO_ON, false);
    config::set_print(&config::PRINT_ELSE_ON, false);
}

/// Reads [Settings] from the program arguments.
///
/// Arguments have the form `key::value`. `debug` and `help` stand alone.
/// Print toggles are applied to [config] right away.
///
/// ## Errors
/// Unknown keys, values that do not parse and `min_floor > max_floor`.
pub fn parse_args() -> anyhow::Result<Settings> {
    parse_args_from(env::args().skip(1))
}

/// Same as [parse_args], for any list of arguments.
pub fn parse_args_from<I, S>(args: I) -> anyhow::Result<Settings>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut settings = Settings::default();
    let mut min_floor = settings.bounds.min();
    let mut max_floor = settings.bounds.max();

    for arg in args {
        let arg = arg.as_ref().to_lowercase();
        let parts: Vec<&str> = arg.split("::").collect();

        match parts.as_slice() {
            ["help"] => settings.show_help = true,
            ["debug"] | ["debug", "true"] => debug_mode(),
            ["debug", "false"] => {}
            [key, value] => match *key {
                "min_floor" => {
                    min_floor = value
                        .parse()
                        .with_context(|| format!("min_floor '{}' is not a floor", value))?;
                }
                "max_floor" => {
                    max_floor = value
                        .parse()
                        .with_context(|| format!("max_floor '{}' is not a floor", value))?;
                }
                "travel_ms" => {
                    let ms: u64 = value
                        .parse()
                        .with_context(|| format!("travel_ms '{}' is not a number", value))?;
                    settings.travel = Duration::from_millis(ms);
                }
                "dwell_ms" => {
                    let ms: u64 = value
                        .parse()
                        .with_context(|| format!("dwell_ms '{}' is not a number", value))?;
                    settings.dwell = Duration::from_millis(ms);
                }
                "print_car" => config::set_print(&config::PRINT_CAR_ON, parse_flag(key, value)?),
                "print_err" => config::set_print(&config::PRINT_ERR_ON, parse_flag(key, value)?),
                "print_warn" => config::set_print(&config::PRINT_WARN_ON, parse_flag(key, value)?),
                "print_ok" => config::set_print(&config::PRINT_OK_ON, parse_flag(key, value)?),
                "print_info" => config::set_print(&config::PRINT_INFO_ON, parse_flag(key, value)?),
                "print_else" => config::set_print(&config::PRINT_ELSE_ON, parse_flag(key, value)?),
                other => bail!("unknown argument '{}', try 'help'", other),
            },
            _ => bail!("unknown argument '{}', try 'help'", arg),
        }
    }

    settings.bounds = Bounds::new(min_floor, max_floor)
        .ok_or_else(|| anyhow!("min_floor {} is above max_floor {}", min_floor, max_floor))?;
    Ok(settings)
}

/// Builds the car for `settings`, running on real time.
pub fn build_elevator(settings: &Settings) -> Elevator {
    let clock = TokioClock::new(settings.travel, settings.dwell);
    Elevator::new(settings.bounds, Arc::new(clock))
}
