use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_employees_company_id ON employees(company_id)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_company_id ON reservations(company_id)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_date ON reservations(reservation_date)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_id UUID NOT NULL,
            name VARCHAR(255) NOT NULL,
            department VARCHAR(255) NULL,
            position VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table; time_slots holds the slot list as JSON
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_id UUID NOT NULL,
            office_name VARCHAR(255) NOT NULL,
            office_address TEXT NULL,
            reservation_date VARCHAR(32) NOT NULL,
            start_time VARCHAR(8) NOT NULL,
            end_time VARCHAR(8) NOT NULL,
            application_deadline VARCHAR(32) NULL,
            max_participants BIGINT NOT NULL DEFAULT 1,
            service_duration BIGINT NULL,
            break_duration BIGINT NOT NULL DEFAULT 0,
            total_duration BIGINT NULL,
            slot_count BIGINT NOT NULL DEFAULT 0,
            time_slots JSONB NOT NULL DEFAULT '[]',
            slots_filled BIGINT NOT NULL DEFAULT 0,
            hourly_rate BIGINT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'recruiting',
            notes TEXT NULL,
            requirements TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slots_filled CHECK (slots_filled >= 0 AND slots_filled <= slot_count)
        );
        "#,
    )
    .execute(pool)
    .await?;

    for index in INDEXES {
        sqlx::query(index).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
