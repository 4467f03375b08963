//! # Booking Validator
//!
//! Checks, in order:
//!
//! 1. the requested time is not before the working start
//! 2. a full slot starting at the requested time ends by the working end
//! 3. nothing is booked at the exact `(doctor, date, time)`
//!
//! Slot alignment is not checked: a time off the canonical grid is accepted if
//! it passes all three. Check 3 only narrows the race window, the repository's
//! `create_if_absent` is what guarantees uniqueness.

use chrono::NaiveTime;
use tracing::debug;

use crate::errors::{ClinicError, ClinicResult};
use crate::models::appointment::BookAppointment;
use crate::repository::BookingRepository;
use crate::schedule::Schedule;

/// Checks 1 and 2.
pub fn check_working_hours(schedule: &Schedule, time: NaiveTime) -> ClinicResult<()> {
    if time < schedule.working_start() {
        return Err(ClinicError::OutsideWorkingHours(format!(
            "{} is before the doctor's working start {}",
            time.format("%H:%M"),
            schedule.working_start().format("%H:%M")
        )));
    }

    if !schedule.ends_in_time(time) {
        return Err(ClinicError::OutsideWorkingHours(format!(
            "a {} minute slot at {} ends after the doctor's working end {}",
            schedule.slot_duration().num_minutes(),
            time.format("%H:%M"),
            schedule.working_end().format("%H:%M")
        )));
    }

    Ok(())
}

/// Runs all three checks against `repository`.
pub async fn validate_booking(
    schedule: &Schedule,
    booking: &BookAppointment,
    repository: &dyn BookingRepository,
) -> ClinicResult<()> {
    check_working_hours(schedule, booking.time)?;

    if repository
        .exists(booking.doctor_id, booking.date, booking.time)
        .await?
    {
        debug!(
            "Slot already taken: doctor={}, date={}, time={}",
            booking.doctor_id, booking.date, booking.time
        );
        return Err(ClinicError::SlotConflict {
            doctor_id: booking.doctor_id,
            date: booking.date,
            time: booking.time,
        });
    }

    Ok(())
}
