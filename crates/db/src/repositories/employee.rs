use crate::models::DbEmployee;
use eyre::Result;
use sqlx::{Pool, Postgres};
use staffdispatch_core::models::employee::Employee;
use uuid::Uuid;

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Employee>> {
    tracing::debug!("Getting employee by id: {}", id);

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, company_id, name, department, position, created_at
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee.map(Employee::from))
}
