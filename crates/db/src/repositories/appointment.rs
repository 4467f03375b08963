use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an appointment unless the `(doctor, date, time)` slot is taken.
///
/// Uniqueness is decided by the `appointments_doctor_slot_key` constraint
/// inside a single statement, so concurrent callers cannot both win. Returns
/// `None` when the slot was already booked.
pub async fn create_appointment_if_absent(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    patient_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<Option<DbAppointment>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, doctor_id, patient_id, appointment_date, appointment_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT ON CONSTRAINT appointments_doctor_slot_key DO NOTHING
        RETURNING id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        "#,
    )
    .bind(id)
    .bind(doctor_id)
    .bind(patient_id)
    .bind(date)
    .bind(time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if appointment.is_none() {
        tracing::debug!(
            "Slot already booked: doctor={}, date={}, time={}",
            doctor_id, date, time
        );
    }

    Ok(appointment)
}

pub async fn appointment_exists(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE doctor_id = $1 AND appointment_date = $2 AND appointment_time = $3
        );
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .bind(time)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Appointments of one doctor, optionally restricted to a single day.
pub async fn get_appointments_by_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: Option<NaiveDate>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        FROM appointments
        WHERE doctor_id = $1 AND ($2::DATE IS NULL OR appointment_date = $2)
        ORDER BY appointment_date ASC, appointment_time ASC, id ASC
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointments_by_patient(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        FROM appointments
        WHERE patient_id = $1
        ORDER BY appointment_date ASC, appointment_time ASC, id ASC
        "#,
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_all_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        FROM appointments
        ORDER BY appointment_date ASC, appointment_time ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn delete_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        RETURNING id, doctor_id, patient_id, appointment_date, appointment_time, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
