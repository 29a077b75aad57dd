//! Scan dispatcher.
//!
//! One step of the run loop is split into synchronous decision phases that run
//! under the car mutex, and the two suspension points (travel, dwell) that run
//! without it:
//!
//! ```text
//! begin_step ──► Finished                          (nothing pending, loop ends)
//!            ──► Done                              (went idle)
//!            ──► Dwell ── await_dwell ── finish_dwell
//!            ──► Travel ── await_travel ── finish_travel ──► Done
//!                                                        └─► Dwell ── await_dwell ── finish_dwell
//! ```
//!
//! The car keeps scanning in its committed direction while anything is left ahead,
//! and only reverses once nothing is.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::car_state::{Bounds, CarContainer, Dirn, DispatchStatus};
use crate::elevator_logic::timer::MovementClock;
use crate::print;

/// Outcome of a decision phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPlan {
    /// Nothing was pending at the start of the step. The run loop ends.
    Finished,
    /// The step is over, no further suspension.
    Done,
    /// A stop was serviced at `floor`, doors are open.
    Dwell {
        /// serviced floor
        floor: u8,
    },
    /// The car is committed to move one floor.
    Travel,
}

/// Picks a direction towards the nearest pending stop.
///
/// Stays [`Dirn::Idle`] if the nearest stop is the current floor. Leaves the
/// direction alone when nothing is pending.
pub fn choose_direction(car: &mut CarContainer) {
    if let Some(target) = car.queue.nearest(car.floor) {
        car.dirn = match target.cmp(&car.floor) {
            Ordering::Greater => Dirn::Up,
            Ordering::Less => Dirn::Down,
            Ordering::Equal => Dirn::Idle,
        };
    }
}

/// True if a stop is owed at the current floor in the current direction.
pub fn should_stop(car: &CarContainer) -> bool {
    car.queue.contains(car.dirn, car.floor)
}

fn service_stop(car: &mut CarContainer) -> StepPlan {
    car.queue.remove_for(car.dirn, car.floor);
    print::car(format!("Open doors at {}", car.floor));
    StepPlan::Dwell { floor: car.floor }
}

/// Next floor in `dirn`, clamped to `bounds`. `None` if the car cannot move.
pub fn next_floor(bounds: Bounds, floor: u8, dirn: Dirn) -> Option<u8> {
    let delta: i16 = match dirn {
        Dirn::Up => 1,
        Dirn::Down => -1,
        Dirn::Idle => return None,
    };
    let next = bounds.clamp(floor as i16 + delta);
    (next != floor).then_some(next)
}

/// First phase of a step: idle check, direction pick, stop check, continuation check.
pub fn begin_step(car: &mut CarContainer) -> StepPlan {
    if !car.queue.has_any() {
        car.dirn = Dirn::Idle;
        car.status = DispatchStatus::Idle;
        return StepPlan::Finished;
    }

    if car.dirn == Dirn::Idle {
        choose_direction(car);
    }

    if should_stop(car) {
        return service_stop(car);
    }

    if !car.queue.has_ahead(car.dirn, car.floor) {
        if car.queue.has_opposite(car.dirn) {
            car.dirn = car.dirn.reversed();
            print::car(format!("Reverse to {} at {}", car.dirn, car.floor));
            if should_stop(car) {
                return service_stop(car);
            }
        } else {
            car.dirn = Dirn::Idle;
            return StepPlan::Done;
        }
    }

    StepPlan::Travel
}

/// Phase after the travel delay: move one floor, or reverse at a boundary.
pub fn finish_travel(car: &mut CarContainer) -> StepPlan {
    // direction may have been changed by an intake call while travelling
    if car.dirn == Dirn::Idle {
        return StepPlan::Done;
    }

    match next_floor(car.bounds, car.floor, car.dirn) {
        None => {
            car.dirn = car.dirn.reversed();
            print::warn(format!("Boundary at floor {}, reversing to {}", car.floor, car.dirn));
            StepPlan::Done
        }
        Some(next) => {
            print::car(format!("Move {} to {}", car.dirn, next));
            car.floor = next;
            if should_stop(car) {
                service_stop(car)
            } else {
                StepPlan::Done
            }
        }
    }
}

/// Phase after the dwell delay: close doors, go idle if nothing is left.
pub fn finish_dwell(car: &mut CarContainer) -> StepPlan {
    print::car(format!("Close doors at {}", car.floor));
    if !car.queue.has_any() {
        car.dirn = Dirn::Idle;
    }
    StepPlan::Done
}

async fn dwell(car: &Mutex<CarContainer>, clock: &dyn MovementClock, epoch: u64) {
    clock.await_dwell().await;
    let mut car = car.lock().await;
    if car.epoch == epoch {
        finish_dwell(&mut car);
    }
}

/// Runs one step. Returns `false` once the step found nothing pending.
pub async fn step(car: &Mutex<CarContainer>, clock: &dyn MovementClock) -> bool {
    let (plan, epoch) = {
        let mut car = car.lock().await;
        (begin_step(&mut car), car.epoch)
    };

    match plan {
        StepPlan::Finished => return false,
        StepPlan::Done => {}
        StepPlan::Dwell { .. } => dwell(car, clock, epoch).await,
        StepPlan::Travel => {
            clock.await_travel().await;
            let plan = {
                let mut car = car.lock().await;
                if car.epoch != epoch {
                    // reset while travelling
                    return true;
                }
                finish_travel(&mut car)
            };
            if let StepPlan::Dwell { .. } = plan {
                dwell(car, clock, epoch).await;
            }
        }
    }
    true
}

/// Run loop: steps until a step finds nothing pending. Returns the number of steps taken.
///
/// The caller must have moved the car to [`DispatchStatus::Dispatching`]; the final
/// step puts it back to [`DispatchStatus::Idle`] under the same lock that saw the
/// empty queue.
pub async fn run_dispatch(car: Arc<Mutex<CarContainer>>, clock: Arc<dyn MovementClock>) -> usize {
    let mut steps = 0;
    while step(&car, clock.as_ref()).await {
        steps += 1;
    }
    steps
}
