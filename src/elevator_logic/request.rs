//! Pending stop bookkeeping.
//!
//! This module provides the [`RequestQueue`]: the two collections of floors the car
//! still owes a stop at, one consulted while travelling up and one while travelling down.
//!
//! # Overview
//! - Insert and remove floors per direction.
//! - Membership test for the stop check at the current floor.
//! - "Nearest pending stop" used to pick a direction from idle.
//! - "Anything ahead" / "anything behind" used by the continuation check.
//!
//! # Behaviour
//! Both collections are true sets. Inserting a floor that is already pending in the
//! same direction is absorbed, and a single service removes it.
//!
//! The queue does no bounds checking, that happens at the intake boundary.

use std::collections::BTreeSet;

use crate::car_state::Dirn;

/// Floors owed a stop, split by the direction they are serviced in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQueue {
    up: BTreeSet<u8>,
    down: BTreeSet<u8>,
}

impl RequestQueue {
    /// Adds a stop serviced while moving up.
    pub fn insert_up(&mut self, floor: u8) {
        self.up.insert(floor);
    }

    /// Adds a stop serviced while moving down.
    pub fn insert_down(&mut self, floor: u8) {
        self.down.insert(floor);
    }

    /// True if either set is non-empty.
    pub fn has_any(&self) -> bool {
        !self.up.is_empty() || !self.down.is_empty()
    }

    /// Membership in the set tied to `dirn`. For [`Dirn::Idle`] either set counts.
    pub fn contains(&self, dirn: Dirn, floor: u8) -> bool {
        match dirn {
            Dirn::Up => self.up.contains(&floor),
            Dirn::Down => self.down.contains(&floor),
            Dirn::Idle => self.up.contains(&floor) || self.down.contains(&floor),
        }
    }

    /// Removes `floor` from the set tied to `dirn`, from both sets for [`Dirn::Idle`].
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_for(&mut self, dirn: Dirn, floor: u8) -> bool {
        match dirn {
            Dirn::Up => self.up.remove(&floor),
            Dirn::Down => self.down.remove(&floor),
            Dirn::Idle => {
                let up = self.up.remove(&floor);
                let down = self.down.remove(&floor);
                up || down
            }
        }
    }

    /// Pending floor closest to `from` over both sets. Ties go to the lower floor.
    pub fn nearest(&self, from: u8) -> Option<u8> {
        self.up
            .iter()
            .chain(self.down.iter())
            .copied()
            .min_by_key(|&floor| (floor.abs_diff(from), floor))
    }

    /// Continuation check.
    ///
    /// Going up: an up stop at or above `floor`, or any stop strictly above it.
    /// Going down: a down stop at or below `floor`, or any stop strictly below it.
    /// Never true for [`Dirn::Idle`].
    pub fn has_ahead(&self, dirn: Dirn, floor: u8) -> bool {
        match dirn {
            Dirn::Up => {
                self.up.range(floor..).next().is_some()
                    || (floor < u8::MAX && self.down.range(floor + 1..).next().is_some())
            }
            Dirn::Down => {
                self.down.range(..=floor).next().is_some()
                    || self.up.range(..floor).next().is_some()
            }
            Dirn::Idle => false,
        }
    }

    /// True if the set serviced in the opposite direction has anything in it.
    pub fn has_opposite(&self, dirn: Dirn) -> bool {
        match dirn {
            Dirn::Up => !self.down.is_empty(),
            Dirn::Down => !self.up.is_empty(),
            Dirn::Idle => false,
        }
    }

    /// Up stops, ascending.
    pub fn up_floors(&self) -> impl Iterator<Item = u8> + '_ {
        self.up.iter().copied()
    }

    /// Down stops, descending.
    pub fn down_floors(&self) -> impl Iterator<Item = u8> + '_ {
        self.down.iter().rev().copied()
    }

    /// Drops every pending stop.
    pub fn clear(&mut self) {
        self.up.clear();
        self.down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(up: &[u8], down: &[u8]) -> RequestQueue {
        let mut q = RequestQueue::default();
        up.iter().for_each(|&f| q.insert_up(f));
        down.iter().for_each(|&f| q.insert_down(f));
        q
    }

    #[test]
    fn empty_queue_has_nothing() {
        let q = RequestQueue::default();
        assert!(!q.has_any());
        assert_eq!(q.nearest(5), None);
        assert!(!q.has_ahead(Dirn::Up, 0));
        assert!(!q.has_ahead(Dirn::Down, 10));
    }

    #[test]
    fn sets_keep_travel_order() {
        let q = queue(&[8, 2, 5], &[1, 9, 4]);
        assert_eq!(q.up_floors().collect::<Vec<_>>(), vec![2, 5, 8]);
        assert_eq!(q.down_floors().collect::<Vec<_>>(), vec![9, 4, 1]);
    }

    #[test]
    fn duplicate_insert_is_absorbed() {
        let mut q = queue(&[3, 3], &[]);
        assert_eq!(q.up_floors().count(), 1);
        assert!(q.remove_for(Dirn::Up, 3));
        assert!(!q.has_any());
    }

    #[test]
    fn contains_follows_direction() {
        let q = queue(&[3], &[6]);
        assert!(q.contains(Dirn::Up, 3));
        assert!(!q.contains(Dirn::Down, 3));
        assert!(q.contains(Dirn::Down, 6));
        assert!(!q.contains(Dirn::Up, 6));
        assert!(q.contains(Dirn::Idle, 3));
        assert!(q.contains(Dirn::Idle, 6));
        assert!(!q.contains(Dirn::Idle, 4));
    }

    #[test]
    fn idle_removal_clears_both_sets() {
        let mut q = queue(&[4], &[4, 2]);
        assert!(q.remove_for(Dirn::Idle, 4));
        assert_eq!(q.up_floors().count(), 0);
        assert_eq!(q.down_floors().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn directed_removal_leaves_other_set() {
        let mut q = queue(&[4], &[4]);
        assert!(q.remove_for(Dirn::Down, 4));
        assert!(q.contains(Dirn::Up, 4));
        assert!(!q.remove_for(Dirn::Down, 4));
    }

    #[test]
    fn nearest_breaks_ties_low() {
        let q = queue(&[7], &[3]);
        assert_eq!(q.nearest(5), Some(3));
        let q = queue(&[6], &[9]);
        assert_eq!(q.nearest(5), Some(6));
        let q = queue(&[5], &[]);
        assert_eq!(q.nearest(5), Some(5));
    }

    #[test]
    fn ahead_counts_same_set_at_current_floor() {
        let q = queue(&[4], &[]);
        assert!(q.has_ahead(Dirn::Up, 4));
        assert!(!q.has_ahead(Dirn::Up, 5));
        let q = queue(&[], &[4]);
        assert!(q.has_ahead(Dirn::Down, 4));
        assert!(!q.has_ahead(Dirn::Down, 3));
    }

    #[test]
    fn ahead_counts_opposite_set_strictly_beyond() {
        // down call above an up-moving car is a target for the sweep
        let q = queue(&[], &[6]);
        assert!(q.has_ahead(Dirn::Up, 0));
        assert!(!q.has_ahead(Dirn::Up, 6));
        let q = queue(&[2], &[]);
        assert!(q.has_ahead(Dirn::Down, 5));
        assert!(!q.has_ahead(Dirn::Down, 2));
    }

    #[test]
    fn opposite_and_idle() {
        let q = queue(&[1], &[]);
        assert!(q.has_opposite(Dirn::Down));
        assert!(!q.has_opposite(Dirn::Up));
        assert!(!q.has_opposite(Dirn::Idle));
        assert!(!q.has_ahead(Dirn::Idle, 0));
    }

    #[test]
    fn clear_empties_both() {
        let mut q = queue(&[1, 2], &[3]);
        q.clear();
        assert!(!q.has_any());
    }
}
