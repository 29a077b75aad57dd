use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel as cbc;
use futures::future::{BoxFuture, FutureExt};
use tokio::time::sleep;

use elevatorscan::car_state::{Bounds, CallDirection, Dirn, DispatchStatus};
use elevatorscan::console::{self, scenario};
use elevatorscan::elevator_logic::timer::{InstantClock, MovementClock, TokioClock};
use elevatorscan::elevator_logic::Elevator;
use elevatorscan::error::RequestError;

fn real_time_car() -> Elevator {
    Elevator::new(Bounds::default(), Arc::new(TokioClock::default()))
}

async fn assert_parked(elevator: &Elevator, floor: u8) {
    let snapshot = elevator.snapshot().await;
    assert_eq!(snapshot.floor, floor);
    assert_eq!(snapshot.direction, Dirn::Idle);
    assert_eq!(snapshot.status, DispatchStatus::Idle);
    assert!(!snapshot.has_pending_requests());
}

#[tokio::test(start_paused = true)]
async fn ground_floor_pickup_ends_at_five() {
    let elevator = real_time_car();
    scenario::run_scenario(&elevator, 1).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 5).await;
}

#[tokio::test(start_paused = true)]
async fn two_down_calls_end_at_one() {
    let elevator = real_time_car();
    scenario::run_scenario(&elevator, 2).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 1).await;
}

#[tokio::test(start_paused = true)]
async fn mixed_calls_end_at_ground_floor() {
    let elevator = real_time_car();
    scenario::run_scenario(&elevator, 3).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 0).await;
}

#[tokio::test(start_paused = true)]
async fn full_sweep_ends_at_ground_floor() {
    let elevator = real_time_car();
    scenario::run_scenario(&elevator, 4).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 0).await;
}

#[tokio::test(start_paused = true)]
async fn scenario_with_unreachable_floor_fails() {
    let elevator = Elevator::new(Bounds::new(0, 6).unwrap(), Arc::new(TokioClock::default()));
    // scenario 4 calls floor 10
    assert!(scenario::run_scenario(&elevator, 4).await.is_err());
    assert!(scenario::run_scenario(&elevator, 9).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn wait_for_floor_times_out() {
    let elevator = real_time_car();
    let reached =
        scenario::wait_until_floor_and_direction(&elevator, 7, Dirn::Up, Duration::from_secs(2)).await;
    assert!(!reached);
}

#[tokio::test]
async fn instant_clock_counts_moves_and_stops() {
    let clock = Arc::new(InstantClock::new());
    let elevator = Elevator::new(Bounds::default(), clock.clone());

    elevator.car_call(4).await.unwrap();
    elevator.wait_until_idle().await;

    assert_parked(&elevator, 4).await;
    assert_eq!(clock.travels(), 4);
    assert_eq!(clock.dwells(), 1);
}

#[tokio::test(start_paused = true)]
async fn out_of_bounds_request_is_rejected() {
    let elevator = real_time_car();
    let before = elevator.snapshot().await;

    let err = elevator.car_call(11).await.unwrap_err();
    assert_eq!(err, RequestError::InvalidFloorRequest { floor: 11, min: 0, max: 10 });
    assert!(elevator.hall_call(200, CallDirection::Down).await.is_err());
    assert!(elevator.reset(11).await.is_err());

    assert_eq!(elevator.snapshot().await, before);
}

#[tokio::test(start_paused = true)]
async fn car_call_for_current_floor_does_nothing() {
    let elevator = real_time_car();
    elevator.car_call(0).await.unwrap();
    let snapshot = elevator.snapshot().await;
    assert_eq!(snapshot.status, DispatchStatus::Idle);
    assert_eq!(snapshot.dispatch_runs, 0);
    assert!(!elevator.has_pending_requests().await);
}

#[tokio::test(start_paused = true)]
async fn back_to_back_calls_share_one_run_loop() {
    let elevator = real_time_car();
    elevator.car_call(3).await.unwrap();
    elevator.car_call(6).await.unwrap();
    elevator.hall_call(2, CallDirection::Up).await.unwrap();

    let snapshot = elevator.snapshot().await;
    assert_eq!(snapshot.status, DispatchStatus::Dispatching);
    assert_eq!(snapshot.up_stops, vec![2, 3, 6]);

    elevator.wait_until_idle().await;
    assert_parked(&elevator, 6).await;
    assert_eq!(elevator.snapshot().await.dispatch_runs, 1);
}

#[tokio::test(start_paused = true)]
async fn observers_follow_the_car() {
    let elevator = real_time_car();
    elevator.car_call(3).await.unwrap();
    assert_eq!(elevator.current_direction().await, Dirn::Up);

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(elevator.current_floor().await, 1);
    assert_eq!(elevator.current_direction().await, Dirn::Up);
    assert!(elevator.has_pending_requests().await);

    elevator.wait_until_idle().await;
    assert_eq!(elevator.current_floor().await, 3);
    assert_eq!(elevator.current_direction().await, Dirn::Idle);
}

#[tokio::test(start_paused = true)]
async fn reset_while_travelling_parks_the_car() {
    let elevator = real_time_car();
    elevator.car_call(8).await.unwrap();
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(elevator.current_floor().await, 2);

    elevator.reset(0).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 0).await;

    // the car is usable again afterwards
    elevator.car_call(2).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 2).await;
    assert_eq!(elevator.snapshot().await.dispatch_runs, 2);
}

struct BrokenClock;

impl MovementClock for BrokenClock {
    fn await_travel(&self) -> BoxFuture<'_, ()> {
        async { panic!("motor stalled"); }.boxed()
    }

    fn await_dwell(&self) -> BoxFuture<'_, ()> {
        async {}.boxed()
    }
}

#[tokio::test]
async fn panicking_run_loop_is_reported_and_recoverable() {
    let elevator = Elevator::new(Bounds::default(), Arc::new(BrokenClock));
    elevator.car_call(5).await.unwrap();

    // the supervisor has to run before the status goes back to idle
    elevator.wait_until_idle().await;

    let snapshot = elevator.snapshot().await;
    assert_eq!(snapshot.dispatch_failures, 1);
    assert_eq!(snapshot.direction, Dirn::Idle);
    assert_eq!(snapshot.up_stops, vec![5]);
    assert_eq!(snapshot.floor, 0);
}

#[tokio::test(start_paused = true)]
async fn console_drives_the_car() {
    let elevator = real_time_car();
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    for line in ["", "help", "fly 3", "car 42", "hall 4 down", "car 2", "status", "status json", "exit"] {
        line_tx.send(line.to_string()).unwrap();
    }

    console::run_console_with(elevator.clone(), line_rx).await.unwrap();
    elevator.wait_until_idle().await;
    assert_parked(&elevator, 4).await;
}

#[tokio::test(start_paused = true)]
async fn console_stops_at_end_of_input() {
    let elevator = real_time_car();
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    line_tx.send("reset 3".to_string()).unwrap();
    drop(line_tx);

    console::run_console_with(elevator.clone(), line_rx).await.unwrap();
    assert_parked(&elevator, 3).await;
}
