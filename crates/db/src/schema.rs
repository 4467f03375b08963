use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            specialization VARCHAR(100) NOT NULL DEFAULT 'General',
            clinic_name VARCHAR(100) NOT NULL DEFAULT '',
            clinic_address VARCHAR(255) NOT NULL DEFAULT '',
            working_start TIME NOT NULL,
            working_end TIME NOT NULL,
            slot_minutes INTEGER NOT NULL DEFAULT 120,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_working_hours CHECK (working_end > working_start),
            CONSTRAINT positive_slot_minutes CHECK (slot_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create patients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            phone VARCHAR(20) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. Cascading removal is done explicitly by the
    // repositories, so the foreign keys do not cascade.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            patient_id UUID NOT NULL REFERENCES patients(id),
            appointment_date DATE NOT NULL,
            appointment_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT appointments_doctor_slot_key
                UNIQUE (doctor_id, appointment_date, appointment_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes. Several statements, so this goes through the simple
    // query protocol rather than a prepared statement.
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_date_time ON appointments(appointment_date, appointment_time);
        CREATE INDEX IF NOT EXISTS idx_doctors_name ON doctors(name);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
