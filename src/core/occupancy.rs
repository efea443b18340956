//! Per-hotel occupancy accounting.

use crate::core::request::HotelId;

/// Available-guest counts per hotel.
///
/// A transfer subtracts from its origin only after [`OccupancyTable::has_capacity`]
/// confirmed the units are there, and adds to its destination exactly once
/// after transit. During transit the units are counted at neither hotel.
/// Callers hold the board lock for every operation.
#[derive(Debug, Clone)]
pub struct OccupancyTable {
    guests: Vec<u32>,
}

impl OccupancyTable {
    /// Build a table from initial per-hotel guest counts.
    #[must_use]
    pub fn new(initial: Vec<u32>) -> Self {
        Self { guests: initial }
    }

    /// Whether `hotel` currently holds at least `units` guests.
    #[must_use]
    pub fn has_capacity(&self, hotel: HotelId, units: u32) -> bool {
        self.guests.get(hotel).is_some_and(|&g| g >= units)
    }

    /// Subtract `units` guests from `hotel`.
    ///
    /// # Panics
    ///
    /// Panics if the capacity check did not hold. Underflow here means the
    /// reserve-before-remove invariant was broken somewhere, which is fatal:
    /// the simulation must not continue with negative occupancy.
    pub fn reserve(&mut self, hotel: HotelId, units: u32) {
        assert!(
            self.has_capacity(hotel, units),
            "occupancy underflow at hotel {hotel}: reserving {units}"
        );
        self.guests[hotel] -= units;
    }

    /// Add `units` guests back to `hotel` after transit. No upper bound.
    ///
    /// # Panics
    ///
    /// Panics if `hotel` is not in the table; requests are range-checked
    /// before they reach the pool.
    pub fn release(&mut self, hotel: HotelId, units: u32) {
        self.guests[hotel] += units;
    }

    /// Current guest count at `hotel`, or `None` for an unknown id.
    #[must_use]
    pub fn guests(&self, hotel: HotelId) -> Option<u32> {
        self.guests.get(hotel).copied()
    }

    /// Number of hotels in the table.
    #[must_use]
    pub fn hotel_count(&self) -> usize {
        self.guests.len()
    }

    /// Sum of guests across all hotels.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.guests.iter().map(|&g| u64::from(g)).sum()
    }

    /// Copy of the per-hotel counts for reporting.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u32> {
        self.guests.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_and_release() {
        let mut table = OccupancyTable::new(vec![5, 0]);
        assert!(table.has_capacity(0, 5));
        assert!(!table.has_capacity(0, 6));
        assert!(!table.has_capacity(1, 1));

        table.reserve(0, 5);
        assert_eq!(table.guests(0), Some(0));

        table.release(1, 5);
        assert_eq!(table.guests(1), Some(5));
        assert_eq!(table.total_units(), 5);
    }

    #[test]
    fn test_unknown_hotel_has_no_capacity() {
        let table = OccupancyTable::new(vec![3]);
        assert!(!table.has_capacity(7, 1));
        assert_eq!(table.guests(7), None);
    }

    #[test]
    fn test_zero_unit_reserve_on_empty_hotel() {
        let mut table = OccupancyTable::new(vec![0]);
        assert!(table.has_capacity(0, 0));
        table.reserve(0, 0);
        assert_eq!(table.guests(0), Some(0));
    }

    #[test]
    #[should_panic(expected = "occupancy underflow")]
    fn test_reserve_without_capacity_panics() {
        let mut table = OccupancyTable::new(vec![2]);
        table.reserve(0, 3);
    }

    #[test]
    fn test_snapshot_and_totals() {
        let table = OccupancyTable::new(vec![1, 2, 3]);
        assert_eq!(table.hotel_count(), 3);
        assert_eq!(table.total_units(), 6);
        assert_eq!(table.snapshot(), vec![1, 2, 3]);
    }
}
