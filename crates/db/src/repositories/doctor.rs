use crate::models::DbDoctor;
use chrono::Utc;
use clinic_core::models::doctor::NewDoctor;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &NewDoctor) -> Result<DbDoctor> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating doctor: id={}, name={}, hours={}-{}, slot_minutes={}",
        id, doctor.name, doctor.working_start, doctor.working_end, doctor.slot_minutes
    );

    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (id, name, specialization, clinic_name, clinic_address,
                             working_start, working_end, slot_minutes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, specialization, clinic_name, clinic_address,
                  working_start, working_end, slot_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(&doctor.name)
    .bind(&doctor.specialization)
    .bind(&doctor.clinic_name)
    .bind(&doctor.clinic_address)
    .bind(doctor.working_start)
    .bind(doctor.working_end)
    .bind(doctor.slot_minutes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialization, clinic_name, clinic_address,
               working_start, working_end, slot_minutes, created_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if row.is_none() {
        tracing::debug!("Doctor not found: id={}", id);
    }

    Ok(row)
}

pub async fn list_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbDoctor>> {
    let rows = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialization, clinic_name, clinic_address,
               working_start, working_end, slot_minutes, created_at
        FROM doctors
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Overwrites the editable columns. Existing appointments are left alone even
/// if they fall outside the new working window.
pub async fn update_doctor(
    pool: &Pool<Postgres>,
    id: Uuid,
    doctor: &NewDoctor,
) -> Result<Option<DbDoctor>> {
    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        UPDATE doctors
        SET name = $2, specialization = $3, clinic_name = $4, clinic_address = $5,
            working_start = $6, working_end = $7, slot_minutes = $8
        WHERE id = $1
        RETURNING id, name, specialization, clinic_name, clinic_address,
                  working_start, working_end, slot_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(&doctor.name)
    .bind(&doctor.specialization)
    .bind(&doctor.clinic_name)
    .bind(&doctor.clinic_address)
    .bind(doctor.working_start)
    .bind(doctor.working_end)
    .bind(doctor.slot_minutes)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Deletes the doctor and their appointments in one transaction.
///
/// Returns the number of appointments removed, or `None` (with nothing
/// deleted) when the doctor does not exist.
pub async fn delete_doctor_cascade(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<u64>> {
    let mut tx = pool.begin().await?;

    // Holding the row lock makes concurrent bookings wait for this
    // transaction and then fail their foreign key check.
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM doctors
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if locked.is_none() {
        tx.rollback().await?;
        return Ok(None);
    }

    let appointments_removed = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE doctor_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let doctors_removed = sqlx::query(
        r#"
        DELETE FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if doctors_removed == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;

    tracing::debug!(
        "Doctor deleted: id={}, appointments_removed={}",
        id, appointments_removed
    );
    Ok(Some(appointments_removed))
}
