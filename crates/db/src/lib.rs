//! Postgres persistence for reservations.
//!
//! Reservation rows keep their slot list in a `JSONB` column. Every change to
//! a stored reservation happens in one transaction that locks the row, so
//! two concurrent claims on the same slot cannot both succeed.

pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
