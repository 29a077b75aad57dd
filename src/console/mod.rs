//! # Console
//!
//! Line based front end for the car. Standard input is read on its own thread and
//! handed over a `crossbeam_channel`, the async side polls it so the runtime is never
//! blocked on a read.
//!
//! Scenarios run in their own task, the prompt comes back right away.

pub mod command;
pub mod scenario;

use std::io::{self, BufRead, Write};
use std::thread;

use crossbeam_channel as cbc;
use tokio::time::sleep;

use crate::car_state::serial;
use crate::config;
use crate::elevator_logic::Elevator;
use crate::print;
use command::{Command, HELP};

/// What the console loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading
    Continue,
    /// `exit` was given
    Exit,
}

/// Spawns the thread that forwards standard input line by line.
///
/// The sender is dropped at end of input, which closes the channel.
pub fn spawn_stdin_reader() -> cbc::Receiver<String> {
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    print::err(format!("Failed to read from stdin: {}", e));
                    break;
                }
            }
        }
    });
    line_rx
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Runs the console on standard input until `exit` or end of input.
pub async fn run_console(elevator: Elevator) -> anyhow::Result<()> {
    println!("Elevator console");
    println!("Type 'help' for commands. Type 'exit' to quit.");
    run_console_with(elevator, spawn_stdin_reader()).await
}

/// Runs the console on the lines arriving on `lines` until `exit` or the channel closes.
pub async fn run_console_with(elevator: Elevator, lines: cbc::Receiver<String>) -> anyhow::Result<()> {
    prompt();
    loop {
        match lines.try_recv() {
            Ok(line) => {
                if handle_line(&elevator, &line).await? == Flow::Exit {
                    return Ok(());
                }
                prompt();
            }
            Err(cbc::TryRecvError::Empty) => sleep(config::POLL_PERIOD).await,
            Err(cbc::TryRecvError::Disconnected) => {
                println!();
                return Ok(());
            }
        }
    }
}

/// Parses and executes one console line.
///
/// Bad input is reported to the user and is not an error. Only a failure to
/// render the status comes back as `Err`.
pub async fn handle_line(elevator: &Elevator, line: &str) -> anyhow::Result<Flow> {
    let cmd = match command::parse(line, elevator.bounds()) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return Ok(Flow::Continue),
        Err(e) => {
            println!("{}", e);
            return Ok(Flow::Continue);
        }
    };

    match cmd {
        Command::Help => println!("{}", HELP),
        Command::Exit => return Ok(Flow::Exit),
        Command::Hall { floor, call } => {
            if let Err(e) = elevator.hall_call(floor, call).await {
                print::err(e.to_string());
            }
        }
        Command::Car { floor } => {
            if let Err(e) = elevator.car_call(floor).await {
                print::err(e.to_string());
            }
        }
        Command::Test(n) => {
            let elevator = elevator.clone();
            tokio::spawn(async move {
                if let Err(e) = scenario::run_scenario(&elevator, n).await {
                    print::err(format!("{:#}", e));
                }
            });
        }
        Command::Status { json: false } => {
            print::car_status(&elevator.snapshot().await, elevator.bounds());
        }
        Command::Status { json: true } => {
            let snapshot = elevator.snapshot().await;
            let text = serial::serialize_snapshot(&snapshot)
                .ok_or_else(|| anyhow::anyhow!("could not serialize the car state"))?;
            println!("{}", text);
        }
        Command::Reset(floor) => {
            let floor = floor.unwrap_or(elevator.bounds().min());
            if let Err(e) = elevator.reset(floor).await {
                print::err(e.to_string());
            }
        }
    }
    Ok(Flow::Continue)
}
