//! # Elevator logic
//!
//! The [`Elevator`] handle is what callers use to talk to the car:
//! - **Intake**: [`Elevator::hall_call`], [`Elevator::car_call`], [`Elevator::reset`].
//! - **Observers**: [`Elevator::current_floor`], [`Elevator::current_direction`],
//!   [`Elevator::has_pending_requests`], [`Elevator::snapshot`].
//!
//! All state lives in one [`CarContainer`] behind a `tokio::sync::Mutex`. Intake calls
//! and the run loop take the lock for their decisions and release it before any delay,
//! so neither ever observes a half-applied change.
//!
//! The first request that finds the car idle claims it ([`DispatchStatus::Dispatching`])
//! and launches the run loop ([`fsm::run_dispatch`]) as a tokio task. A supervisor task
//! awaits it and reports a panic instead of losing it. Requests arriving while the loop
//! is active only update the queue; the running loop picks them up on its next step.

pub mod fsm;
pub mod request;
pub mod timer;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::car_state::{Bounds, CallDirection, CarContainer, CarSnapshot, Dirn, DispatchStatus};
use crate::config;
use crate::error::RequestError;
use crate::print;
use timer::MovementClock;


/// Claims the car for a new run loop. Returns `true` if the caller must launch one.
fn claim_dispatch(car: &mut CarContainer) -> bool {
    if car.status == DispatchStatus::Idle {
        car.status = DispatchStatus::Dispatching;
        car.dispatch_runs += 1;
        true
    } else {
        false
    }
}

/// Applies a hall call to the car state.
///
/// Hall calls trust the stated direction: the floor goes into the up set for
/// [`CallDirection::Up`], into the down set otherwise. A call at the current floor
/// makes the car adopt that direction, any other call re-aims the car at the nearest
/// pending stop.
///
/// Returns `true` if a run loop has to be launched.
pub(crate) fn accept_hall_call(car: &mut CarContainer, floor: u8, call: CallDirection) -> Result<bool, RequestError> {
    car.bounds.check(floor)?;

    match call {
        CallDirection::Up => car.queue.insert_up(floor),
        CallDirection::Down => car.queue.insert_down(floor),
    }

    if floor == car.floor {
        car.dirn = call.into();
    } else {
        fsm::choose_direction(car);
    }

    Ok(claim_dispatch(car))
}

/// Applies a car call to the car state.
///
/// Car calls carry no direction, it is inferred from where the floor lies relative
/// to the car. A call for the current floor changes nothing.
///
/// Returns `true` if a run loop has to be launched.
pub(crate) fn accept_car_call(car: &mut CarContainer, floor: u8) -> Result<bool, RequestError> {
    car.bounds.check(floor)?;

    if floor == car.floor {
        return Ok(false);
    }

    let inferred = if floor > car.floor {
        car.queue.insert_up(floor);
        Dirn::Up
    } else {
        car.queue.insert_down(floor);
        Dirn::Down
    };

    if car.dirn == Dirn::Idle {
        car.dirn = inferred;
    }

    Ok(claim_dispatch(car))
}

/// Clears all pending stops and parks the car at `start_floor`.
pub(crate) fn apply_reset(car: &mut CarContainer, start_floor: u8) -> Result<(), RequestError> {
    car.bounds.check(start_floor)?;
    car.queue.clear();
    car.dirn = Dirn::Idle;
    car.floor = start_floor;
    car.epoch += 1;
    Ok(())
}


/// Handle to a single elevator car. Cheap to clone, all clones drive the same car.
#[derive(Clone)]
pub struct Elevator {
    bounds: Bounds,
    car: Arc<Mutex<CarContainer>>,
    clock: Arc<dyn MovementClock>,
}

impl Elevator {
    /// New idle car parked at [config::START_FLOOR] (clamped into `bounds`).
    pub fn new(bounds: Bounds, clock: Arc<dyn MovementClock>) -> Self {
        Self {
            bounds,
            car: Arc::new(Mutex::new(CarContainer::new(bounds, config::START_FLOOR))),
            clock,
        }
    }

    /// Serviceable floor range
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Someone outside the car wants to travel `call` from `floor`.
    ///
    /// ## Errors
    /// [`RequestError::InvalidFloorRequest`] if `floor` is out of bounds. Nothing is changed then.
    ///
    /// ## Note
    /// Must be called from within a tokio runtime, the run loop is spawned on it.
    pub async fn hall_call(&self, floor: u8, call: CallDirection) -> Result<(), RequestError> {
        let launch = {
            let mut car = self.car.lock().await;
            accept_hall_call(&mut car, floor, call)?
        };
        print::info(format!("Hall call at {} going {}", floor, Dirn::from(call)));
        if launch {
            self.launch_dispatch();
        }
        Ok(())
    }

    /// Someone inside the car wants to go to `floor`.
    ///
    /// ## Errors
    /// [`RequestError::InvalidFloorRequest`] if `floor` is out of bounds. Nothing is changed then.
    pub async fn car_call(&self, floor: u8) -> Result<(), RequestError> {
        let launch = {
            let mut car = self.car.lock().await;
            accept_car_call(&mut car, floor)?
        };
        print::info(format!("Car call to {}", floor));
        if launch {
            self.launch_dispatch();
        }
        Ok(())
    }

    /// Drops every pending stop, sets the direction idle and parks the car at `start_floor`.
    ///
    /// A run loop that is active at the time ends on its next step. A move or door
    /// cycle that was in flight is discarded.
    pub async fn reset(&self, start_floor: u8) -> Result<(), RequestError> {
        {
            let mut car = self.car.lock().await;
            apply_reset(&mut car, start_floor)?;
        }
        print::info(format!("Reset at {}", start_floor));
        Ok(())
    }

    /// Floor the car is at
    pub async fn current_floor(&self) -> u8 {
        self.car.lock().await.floor
    }

    /// Direction the car is committed to
    pub async fn current_direction(&self) -> Dirn {
        self.car.lock().await.dirn
    }

    /// True if any stop is still owed
    pub async fn has_pending_requests(&self) -> bool {
        self.car.lock().await.queue.has_any()
    }

    /// Read-only copy of the whole car
    pub async fn snapshot(&self) -> CarSnapshot {
        self.car.lock().await.snapshot()
    }

    /// Waits until no run loop is active.
    pub async fn wait_until_idle(&self) {
        loop {
            if self.car.lock().await.status == DispatchStatus::Idle {
                return;
            }
            sleep(config::POLL_PERIOD).await;
        }
    }

    fn launch_dispatch(&self) {
        print::ok("Starting dispatch".to_string());

        let dispatch = tokio::spawn(fsm::run_dispatch(self.car.clone(), self.clock.clone()));

        let car = self.car.clone();
        let _supervisor = tokio::spawn(async move {
            match dispatch.await {
                Ok(steps) => {
                    print::ok(format!("Dispatch finished after {} steps", steps));
                }
                Err(e) => {
                    print::err(format!("Dispatch loop failed: {}", e));
                    let mut car = car.lock().await;
                    car.dispatch_failures += 1;
                    car.status = DispatchStatus::Idle;
                    car.dirn = Dirn::Idle;
                }
            }
        });
    }
}
