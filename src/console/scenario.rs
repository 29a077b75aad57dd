//! Canned request sequences, reachable from the console through `test <n>`.
//!
//! Each script issues calls, waits for the car to reach a floor, then issues the
//! next call the way a passenger stepping in would.

use std::time::Duration;

use anyhow::{bail, Context};
use tokio::time::{sleep, timeout};

use crate::car_state::{CallDirection, Dirn};
use crate::config;
use crate::elevator_logic::Elevator;
use crate::print;

/// Waits until the car is at `floor` going `dirn` (or idle there).
///
/// Returns `false` and logs a warning if that did not happen within `limit`.
pub async fn wait_until_floor_and_direction(
    elevator: &Elevator,
    floor: u8,
    dirn: Dirn,
    limit: Duration,
) -> bool {
    let arrived = timeout(limit, async {
        loop {
            let snapshot = elevator.snapshot().await;
            if snapshot.floor == floor && (snapshot.direction == dirn || snapshot.direction == Dirn::Idle) {
                return;
            }
            sleep(config::POLL_PERIOD).await;
        }
    })
    .await;

    if arrived.is_err() {
        print::warn(format!("Timed out waiting for floor {} while going {}.", floor, dirn));
        return false;
    }
    true
}

/// Runs scenario `n` (1 to 4) against `elevator`.
pub async fn run_scenario(elevator: &Elevator, n: u8) -> anyhow::Result<()> {
    print::info(format!("--- Test {} started ---", n));
    let outcome = match n {
        1 => ground_floor_pickup(elevator).await,
        2 => two_down_calls(elevator).await,
        3 => mixed_calls(elevator).await,
        4 => full_sweep(elevator).await,
        _ => bail!("no scenario {}", n),
    };
    outcome.with_context(|| format!("test {} failed", n))?;
    print::info(format!("--- Test {} queued. Let it finish ---", n));
    Ok(())
}

/// Pickup at the ground floor, then a ride to 5.
async fn ground_floor_pickup(elevator: &Elevator) -> anyhow::Result<()> {
    elevator.hall_call(0, CallDirection::Up).await?;
    wait_until_floor_and_direction(elevator, 0, Dirn::Up, config::SCENARIO_SHORT_WAIT).await;
    elevator.car_call(5).await?;
    Ok(())
}

/// Two people on their way down, both going to 1.
async fn two_down_calls(elevator: &Elevator) -> anyhow::Result<()> {
    elevator.hall_call(6, CallDirection::Down).await?;
    elevator.hall_call(4, CallDirection::Down).await?;
    wait_until_floor_and_direction(elevator, 6, Dirn::Down, config::SCENARIO_WAIT).await;
    elevator.car_call(1).await?;
    wait_until_floor_and_direction(elevator, 4, Dirn::Down, config::SCENARIO_WAIT).await;
    elevator.car_call(1).await?;
    Ok(())
}

async fn mixed_calls(elevator: &Elevator) -> anyhow::Result<()> {
    elevator.hall_call(2, CallDirection::Up).await?;
    elevator.hall_call(4, CallDirection::Down).await?;
    wait_until_floor_and_direction(elevator, 2, Dirn::Up, config::SCENARIO_WAIT).await;
    elevator.car_call(6).await?;
    wait_until_floor_and_direction(elevator, 4, Dirn::Down, config::SCENARIO_LONG_WAIT).await;
    elevator.car_call(0).await?;
    Ok(())
}

/// Up to the top floor and back down, collecting on the way.
async fn full_sweep(elevator: &Elevator) -> anyhow::Result<()> {
    elevator.hall_call(0, CallDirection::Up).await?;
    wait_until_floor_and_direction(elevator, 0, Dirn::Up, config::SCENARIO_SHORT_WAIT).await;
    elevator.car_call(5).await?;
    elevator.hall_call(4, CallDirection::Down).await?;
    elevator.hall_call(10, CallDirection::Down).await?;
    wait_until_floor_and_direction(elevator, 10, Dirn::Down, config::SCENARIO_SWEEP_WAIT).await;
    elevator.car_call(0).await?;
    wait_until_floor_and_direction(elevator, 4, Dirn::Down, config::SCENARIO_RETURN_WAIT).await;
    elevator.car_call(0).await?;
    Ok(())
}
