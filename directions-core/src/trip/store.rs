//! Ordered waypoint collection.
//!
//! The store is the only owner of waypoints. Every operation is a
//! synchronous state transition that either succeeds or reports an
//! out-of-range index and leaves the store untouched.
//!
//! Geocode lookups are tracked with [`RequestTicket`]s. Issuing a ticket
//! stamps the slot with a new generation from a store-wide counter; a
//! response is only applied while its ticket still matches the slot found
//! at the ticket's index. Because generations are never reused, a slot that
//! shifted into that index, or a slot that was reset, never matches an
//! older ticket.

use crate::domain::{MAX_CANDIDATES, Place, Waypoint};

use super::error::StoreError;

/// The store never holds fewer waypoints than this.
pub const MIN_WAYPOINTS: usize = 2;

/// Identifies one lookup issued for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    index: usize,
    generation: u64,
}

impl RequestTicket {
    /// The slot index when the request was issued. The slot may since
    /// have moved; see [`WaypointStore::locate`].
    pub fn index(&self) -> usize {
        self.index
    }

    /// The generation stamped on the slot.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What `remove_waypoint` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Whole trip cleared back to the minimum empty slots.
    Cleared,
    /// The slot was deleted and later slots re-indexed.
    Removed,
    /// The trip was at its minimum size so the slot was emptied instead.
    Reset,
}

#[derive(Debug, Clone)]
struct Slot {
    waypoint: Waypoint,
    /// Generation of the latest ticket or replacement; 0 for fresh slots.
    generation: u64,
}

impl Slot {
    fn empty(index: usize) -> Self {
        Self {
            waypoint: Waypoint::empty(index),
            generation: 0,
        }
    }
}

/// Ordered, mutable collection of trip waypoints.
#[derive(Debug, Clone)]
pub struct WaypointStore {
    slots: Vec<Slot>,
    last_generation: u64,
}

impl Default for WaypointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointStore {
    /// A store holding the minimum number of empty waypoints.
    pub fn new() -> Self {
        Self {
            slots: (0..MIN_WAYPOINTS).map(Slot::empty).collect(),
            last_generation: 0,
        }
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: the store holds at least [`MIN_WAYPOINTS`].
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a waypoint.
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.slots.get(index).map(|s| &s.waypoint)
    }

    /// Iterate over waypoints in trip order.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.slots.iter().map(|s| &s.waypoint)
    }

    /// Owned copy of every waypoint, in trip order.
    pub fn to_vec(&self) -> Vec<Waypoint> {
        self.iter().cloned().collect()
    }

    /// Number of waypoints with a resolved coordinate.
    pub fn active_count(&self) -> usize {
        self.iter().filter(|wp| wp.is_active()).count()
    }

    /// Append an empty waypoint. Returns its index.
    pub fn add_waypoint(&mut self) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot::empty(index));
        index
    }

    /// Insert an empty waypoint just before the last one. Returns its index.
    pub fn insert_waypoint(&mut self) -> usize {
        let index = self.slots.len().saturating_sub(1);
        self.slots.insert(index, Slot::empty(index));
        self.reindex();
        index
    }

    /// Remove a waypoint, or clear the trip when `index` is `None`.
    ///
    /// A trip at its minimum size keeps the slot and empties it instead.
    pub fn remove_waypoint(&mut self, index: Option<usize>) -> Result<Removal, StoreError> {
        let Some(index) = index else {
            *self = Self {
                last_generation: self.last_generation,
                ..Self::new()
            };
            return Ok(Removal::Cleared);
        };

        self.check(index)?;

        if self.slots.len() > MIN_WAYPOINTS {
            self.slots.remove(index);
            self.reindex();
            Ok(Removal::Removed)
        } else {
            self.stamp(index);
            self.slots[index].waypoint.reset();
            Ok(Removal::Reset)
        }
    }

    /// Replace a waypoint wholesale.
    ///
    /// Outstanding lookups for the slot are superseded.
    pub fn update_waypoint(&mut self, index: usize, mut data: Waypoint) -> Result<(), StoreError> {
        self.check(index)?;
        data.index = index;
        self.stamp(index);
        self.slots[index].waypoint = data;
        Ok(())
    }

    /// Mark a slot as waiting for a lookup, or not.
    pub fn set_fetching(&mut self, index: usize, fetching: bool) -> Result<(), StoreError> {
        self.check(index)?;
        self.slots[index].waypoint.is_fetching = fetching;
        Ok(())
    }

    /// Store lookup results on a slot and clear its fetching flag.
    pub fn set_candidate_results(
        &mut self,
        index: usize,
        mut results: Vec<Place>,
    ) -> Result<(), StoreError> {
        self.check(index)?;
        results.truncate(MAX_CANDIDATES);
        let wp = &mut self.slots[index].waypoint;
        wp.candidate_results = results;
        wp.is_fetching = false;
        Ok(())
    }

    /// Mirror the search field text.
    pub fn set_input_value(&mut self, index: usize, text: impl Into<String>) -> Result<(), StoreError> {
        self.check(index)?;
        self.slots[index].waypoint.input_value = text.into();
        Ok(())
    }

    /// Stamp a slot with a new generation for an upcoming lookup.
    pub fn issue_ticket(&mut self, index: usize) -> Result<RequestTicket, StoreError> {
        self.check(index)?;
        let generation = self.stamp(index);
        Ok(RequestTicket { index, generation })
    }

    /// Returns true if no newer ticket or replacement has touched the slot.
    ///
    /// A slot that only moved because of an insert or removal elsewhere
    /// keeps its tickets.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.locate(ticket).is_some()
    }

    /// Current index of the ticket's slot, if the ticket is still current.
    pub fn locate(&self, ticket: &RequestTicket) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.generation == ticket.generation)
    }

    /// Mark the ticket's slot as fetching. Returns false if the ticket is stale.
    pub fn begin_fetch(&mut self, ticket: &RequestTicket) -> bool {
        let Some(index) = self.locate(ticket) else {
            return false;
        };
        self.slots[index].waypoint.is_fetching = true;
        true
    }

    /// Store lookup results if the ticket is current.
    pub fn complete_fetch(&mut self, ticket: &RequestTicket, results: Vec<Place>) -> bool {
        let Some(index) = self.locate(ticket) else {
            return false;
        };
        self.set_candidate_results(index, results).is_ok()
    }

    /// Resolve the slot to `place` if the ticket is current.
    ///
    /// `alternates` become the slot's candidates. The ticket stays current.
    pub fn resolve(&mut self, ticket: &RequestTicket, place: &Place, alternates: Vec<Place>) -> bool {
        let Some(index) = self.locate(ticket) else {
            return false;
        };
        self.slots[index].waypoint = Waypoint::from_place(index, place, alternates);
        true
    }

    /// Clear the fetching flag after a failed lookup, if the ticket is current.
    pub fn fail_fetch(&mut self, ticket: &RequestTicket) -> bool {
        let Some(index) = self.locate(ticket) else {
            return false;
        };
        self.slots[index].waypoint.is_fetching = false;
        true
    }

    fn check(&self, index: usize) -> Result<(), StoreError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Supersede the slot's lookups. Nothing is in flight for it afterwards.
    fn stamp(&mut self, index: usize) -> u64 {
        self.last_generation += 1;
        let slot = &mut self.slots[index];
        slot.generation = self.last_generation;
        slot.waypoint.is_fetching = false;
        self.last_generation
    }

    fn reindex(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.waypoint.index = i;
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Insert,
        Remove(usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            Just(Op::Insert),
            (0usize..8).prop_map(Op::Remove),
            Just(Op::Clear),
        ]
    }

    proptest! {
        /// The store never drops below the minimum and indices stay contiguous
        #[test]
        fn minimum_and_contiguity_hold(ops in prop::collection::vec(op(), 0..60)) {
            let mut store = WaypointStore::new();

            for op in ops {
                let len_before = store.len();
                match op {
                    Op::Add => { store.add_waypoint(); }
                    Op::Insert => { store.insert_waypoint(); }
                    Op::Remove(i) => {
                        let result = store.remove_waypoint(Some(i));
                        if i >= len_before {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(store.len(), len_before);
                        } else if len_before <= MIN_WAYPOINTS {
                            prop_assert_eq!(result, Ok(Removal::Reset));
                            prop_assert_eq!(store.len(), len_before);
                        } else {
                            prop_assert_eq!(result, Ok(Removal::Removed));
                            prop_assert_eq!(store.len(), len_before - 1);
                        }
                    }
                    Op::Clear => { store.remove_waypoint(None).unwrap(); }
                }

                prop_assert!(store.len() >= MIN_WAYPOINTS);
                for (i, wp) in store.iter().enumerate() {
                    prop_assert_eq!(wp.index, i);
                }
            }
        }
    }
}
