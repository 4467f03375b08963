//! # Availability Calculator
//!
//! Free slots are the schedule's canonical slot boundaries minus the times
//! already booked on that day.
//!
//! Booked times are matched exactly. A booked time that does not sit on a slot
//! boundary (an off-grid booking accepted by the validator, or legacy data)
//! does not hide the boundaries it overlaps. There is no partial-overlap
//! collision detection.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::schedule::Schedule;

/// Returns the free slot start times of `schedule`, in chronological order.
pub fn free_slots<I>(schedule: &Schedule, booked: I) -> Vec<NaiveTime>
where
    I: IntoIterator<Item = NaiveTime>,
{
    let booked: HashSet<NaiveTime> = booked.into_iter().collect();

    schedule
        .slot_boundaries()
        .filter(|slot| !booked.contains(slot))
        .collect()
}
