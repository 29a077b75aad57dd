//! ## Printing Module
//!
//! This module is only here to make logging in the terminal easier to read.
//! It allows to print in appropriate colors depending on the situation.
//! It also provides a status print of the car.
use crate::{car_state::{Bounds, CarSnapshot, Dirn, DispatchStatus}, config};
use ansi_term::Colour::{self, Green, Purple, Red, Yellow};
use prettytable::{format, Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

/// Prints a message in a specified color to the terminal.
///
/// If `PRINT_ELSE_ON` is `false`, the message will not be printed.
///
/// ## Parameters
/// - `msg`: The message to print.
/// - `color`: The color to use for the text output.
///
/// ## Example
/// ```
/// use ansi_term::Colour;
/// use elevatorscan::print;
///
/// print::color("Hello, World!".to_string(), Colour::Green);
/// ```
pub fn color(msg: String, color: Colour) {
    if config::print_enabled(&config::PRINT_ELSE_ON) {
        println!("{}{}", color.paint("[CUSTOM]:  "), color.paint(msg));
    }
}

/// Prints an error message in red to the terminal.
///
/// If `PRINT_ERR_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[ERROR\]:   {}", msg
///
/// ## Example
/// ```
/// use elevatorscan::print;
///
/// print::err("Something went wrong!".to_string());
/// ```
pub fn err(msg: String) {
    if config::print_enabled(&config::PRINT_ERR_ON) {
        println!("{}{}", Red.paint("[ERROR]:   "), Red.paint(msg));
    }
}

/// Prints a warning message in yellow to the terminal.
///
/// If `PRINT_WARN_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[WARNING\]: {}", msg
pub fn warn(msg: String) {
    if config::print_enabled(&config::PRINT_WARN_ON) {
        println!("{}{}", Yellow.paint("[WARNING]: "), Yellow.paint(msg));
    }
}

/// Prints a success message in green to the terminal.
///
/// If `PRINT_OK_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[OK\]:      {}", msg
pub fn ok(msg: String) {
    if config::print_enabled(&config::PRINT_OK_ON) {
        println!("{}{}", Green.paint("[OK]:      "), Green.paint(msg));
    }
}

/// Prints an informational message in light blue to the terminal.
///
/// If `PRINT_INFO_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[INFO\]:    {}", msg
pub fn info(msg: String) {
    if config::print_enabled(&config::PRINT_INFO_ON) {
        let light_blue = Colour::RGB(102, 178, 255);
        println!("{}{}", light_blue.paint("[INFO]:    "), light_blue.paint(msg));
    }
}

/// Prints car movement and door events in pink to the terminal.
///
/// If `PRINT_CAR_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[CAR\]:     {}", msg
///
/// ## Example
/// ```
/// use elevatorscan::print;
///
/// print::car("Move up to 3".to_string());
/// ```
pub fn car(msg: String) {
    if config::print_enabled(&config::PRINT_CAR_ON) {
        let pink = Colour::RGB(255, 51, 255);
        println!("{}{}", pink.paint("[CAR]:     "), pink.paint(msg));
    }
}

/// Pads the input text to a fixed display width using spaces.
///
/// Accounts for characters that may take more than one column width (e.g. arrows and
/// emoji), ensuring aligned text in terminal output.
///
/// # Parameters
/// - `text`: The string to pad.
/// - `width`: The total width the text should occupy (including padding).
fn pad_text(text: &str, width: usize) -> String {
    let visible_width = UnicodeWidthStr::width(text);
    let padding = width.saturating_sub(visible_width);
    format!("{}{}", text, " ".repeat(padding))
}

fn dirn_label(dirn: Dirn) -> &'static str {
    match dirn {
        Dirn::Up => "⬆ up",
        Dirn::Down => "⬇ down",
        Dirn::Idle => "■ idle",
    }
}

fn stop_mark(pending: bool) -> &'static str {
    if pending { "🟢" } else { "🔴" }
}

fn floor_list(floors: &[u8]) -> String {
    if floors.is_empty() {
        "-".to_string()
    } else {
        floors.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(" ")
    }
}

/// One line summary of the car, aligned so consecutive lines form columns.
pub fn status_line(snapshot: &CarSnapshot) -> String {
    let status = match snapshot.status {
        DispatchStatus::Idle => "idle",
        DispatchStatus::Dispatching => "dispatching",
    };
    format!(
        "floor {:>3} │ {} │ {} │ up: {} │ down: {}",
        snapshot.floor,
        pad_text(dirn_label(snapshot.direction), 8),
        pad_text(status, 11),
        floor_list(&snapshot.up_stops),
        floor_list(&snapshot.down_stops),
    )
}

/// Builds the per-floor status table of the car, top floor first.
pub fn status_table(snapshot: &CarSnapshot, bounds: Bounds) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Floor"),
        Cell::new("Car"),
        Cell::new("Up stop"),
        Cell::new("Down stop"),
    ]));

    for floor in (bounds.min()..=bounds.max()).rev() {
        let car = if floor == snapshot.floor { dirn_label(snapshot.direction) } else { "" };
        table.add_row(Row::new(vec![
            Cell::new(&floor.to_string()),
            Cell::new(car),
            Cell::new(stop_mark(snapshot.up_stops.contains(&floor))),
            Cell::new(stop_mark(snapshot.down_stops.contains(&floor))),
        ]));
    }
    table
}

/// Logs the current car state to the terminal: a summary line and the per-floor table.
///
/// If `PRINT_CAR_ON` is `false`, the function exits early.
pub fn car_status(snapshot: &CarSnapshot, bounds: Bounds) {
    if !config::print_enabled(&config::PRINT_CAR_ON) {
        return;
    }
    println!("{}", Purple.bold().paint("┌────────────────────────────────┐"));
    println!("{}", Purple.bold().paint("│           CAR STATUS           │"));
    println!("{}", Purple.bold().paint("└────────────────────────────────┘"));
    println!("{}", status_line(snapshot));
    if snapshot.dispatch_failures > 0 {
        println!("{}", Red.paint(format!("dispatch failures: {}", snapshot.dispatch_failures)));
    }
    status_table(snapshot, bounds).printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car_state::CarContainer;

    #[test]
    fn pad_text_counts_display_width() {
        assert_eq!(pad_text("ab", 4), "ab  ");
        assert_eq!(UnicodeWidthStr::width(pad_text("🟢", 4).as_str()), 4);
        assert_eq!(pad_text("too long", 3), "too long");
    }

    #[test]
    fn status_line_lists_stops() {
        let mut car = CarContainer::default();
        car.queue.insert_up(5);
        car.queue.insert_up(2);
        let line = status_line(&car.snapshot());
        assert!(line.contains("up: 2 5"));
        assert!(line.contains("down: -"));
    }

    #[test]
    fn table_has_one_row_per_floor() {
        let bounds = Bounds::new(1, 4).unwrap();
        let car = CarContainer::new(bounds, 1);
        let table = status_table(&car.snapshot(), bounds);
        assert_eq!(table.len(), 4);
    }
}
