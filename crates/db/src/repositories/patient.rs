use crate::models::DbPatient;
use chrono::Utc;
use clinic_core::models::patient::NewPatient;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_patient(pool: &Pool<Postgres>, patient: &NewPatient) -> Result<DbPatient> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbPatient>(
        r#"
        INSERT INTO patients (id, first_name, last_name, phone, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, first_name, last_name, phone, created_at
        "#,
    )
    .bind(id)
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(patient.phone.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Patient created: id={}", id);
    Ok(row)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPatient>> {
    let row = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, first_name, last_name, phone, created_at
        FROM patients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_patients(pool: &Pool<Postgres>) -> Result<Vec<DbPatient>> {
    let rows = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, first_name, last_name, phone, created_at
        FROM patients
        ORDER BY last_name ASC, first_name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn delete_patient_cascade(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<u64>> {
    let mut tx = pool.begin().await?;

    // Holding the row lock makes concurrent bookings wait for this
    // transaction and then fail their foreign key check.
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM patients
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
        WHERE patient_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let patients_removed = sqlx::query(
        r#"
        DELETE FROM patients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if patients_removed == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;

    tracing::debug!(
        "Patient deleted: id={}, appointments_removed={}",
        id, appointments_removed
    );
    Ok(Some(appointments_removed))
}
