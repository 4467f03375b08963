//! # Schedule Model
//!
//! A doctor's bookable day: a working window `[working_start, working_end)` cut
//! into fixed-length slots that start at `working_start`.

use chrono::{Duration, NaiveTime};

use crate::errors::{ClinicError, ClinicResult};

/// Slot length used when a doctor has no explicit setting.
pub const DEFAULT_SLOT_MINUTES: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    working_start: NaiveTime,
    working_end: NaiveTime,
    slot_duration: Duration,
}

impl Schedule {
    /// Creates a schedule, rejecting empty or inverted windows and
    /// non-positive slot lengths.
    pub fn new(
        working_start: NaiveTime,
        working_end: NaiveTime,
        slot_duration: Duration,
    ) -> ClinicResult<Self> {
        if working_start >= working_end {
            return Err(ClinicError::InvalidSchedule(format!(
                "working start {} must be before working end {}",
                working_start.format("%H:%M"),
                working_end.format("%H:%M")
            )));
        }

        if slot_duration <= Duration::zero() {
            return Err(ClinicError::InvalidSchedule(format!(
                "slot duration must be positive, got {} minutes",
                slot_duration.num_minutes()
            )));
        }

        Ok(Self {
            working_start,
            working_end,
            slot_duration,
        })
    }

    /// Schedule with the default two hour slot.
    pub fn with_default_slots(
        working_start: NaiveTime,
        working_end: NaiveTime,
    ) -> ClinicResult<Self> {
        Self::new(working_start, working_end, Duration::minutes(DEFAULT_SLOT_MINUTES))
    }

    pub fn working_start(&self) -> NaiveTime {
        self.working_start
    }

    pub fn working_end(&self) -> NaiveTime {
        self.working_end
    }

    pub fn slot_duration(&self) -> Duration {
        self.slot_duration
    }

    /// Whether a slot starting at `time` ends no later than `working_end`.
    ///
    /// Computed as a difference so that late start times never wrap past
    /// midnight.
    pub fn ends_in_time(&self, time: NaiveTime) -> bool {
        self.working_end.signed_duration_since(time) >= self.slot_duration
    }

    /// Whether a slot starting at `time` lies entirely inside working hours.
    pub fn fits(&self, time: NaiveTime) -> bool {
        time >= self.working_start && self.ends_in_time(time)
    }

    /// Canonical slot start times for one day, in chronological order.
    ///
    /// Each call returns a fresh iterator, so the sequence can be walked any
    /// number of times.
    pub fn slot_boundaries(&self) -> SlotBoundaries {
        SlotBoundaries {
            next: Some(self.working_start),
            schedule: *self,
        }
    }
}

/// Iterator over the slot start times of a [`Schedule`].
#[derive(Debug, Clone)]
pub struct SlotBoundaries {
    next: Option<NaiveTime>,
    schedule: Schedule,
}

impl Iterator for SlotBoundaries {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.schedule.ends_in_time(current) {
            return None;
        }

        // current + slot_duration <= working_end, so this cannot wrap
        self.next = Some(current + self.schedule.slot_duration);
        Some(current)
    }
}

impl std::iter::FusedIterator for SlotBoundaries {}
