use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::database::manager::{self, DatabaseError};
use crate::database::models::{Employee, EmployeePatch, NewEmployee};

/// Errors surfaced by employee store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee not found")]
    NotFound,

    #[error("an employee with this email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// CRUD and search operations over employee records.
///
/// Implementations scope every read and write to active rows
/// (`deleted_at IS NULL`) and report a duplicate active email as
/// [`StoreError::DuplicateEmail`] rather than a raw driver failure.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(
        &self,
        input: &NewEmployee,
        password_hash: &str,
    ) -> Result<Employee, StoreError>;

    async fn list_active(&self) -> Result<Vec<Employee>, StoreError>;

    /// Case-insensitive contains match over name, email and position.
    async fn search(&self, term: &str) -> Result<Vec<Employee>, StoreError>;

    async fn get_active(&self, id: i32) -> Result<Employee, StoreError>;

    /// Applies only the fields present in the patch. The stored credential
    /// hash is derived once at creation and is left untouched here, even
    /// when the name changes.
    async fn update(&self, id: i32, patch: &EmployeePatch) -> Result<Employee, StoreError>;

    async fn soft_delete(&self, id: i32) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

const EMPLOYEE_COLUMNS: &str = r#"id, name, email, department, "position", salary, password_hash, created_at, updated_at, deleted_at"#;

/// Postgres-backed employee store
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    /// Connect, verify connectivity and bootstrap the employees schema.
    /// Callers must treat any failure here as fatal for startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = manager::connect_pool(config).await?;
        manager::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }
}

/// Concurrent creates with the same email race to the partial unique index;
/// the loser's constraint violation is the ordinary duplicate path.
fn translate_unique_violation(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(
        &self,
        input: &NewEmployee,
        password_hash: &str,
    ) -> Result<Employee, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO employees (name, email, department, "position", salary, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Employee>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(&input.position)
            .bind(input.salary)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(translate_unique_violation)
    }

    async fn list_active(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE deleted_at IS NULL ORDER BY id"
        );

        let employees = sqlx::query_as::<_, Employee>(&sql).fetch_all(&self.pool).await?;
        Ok(employees)
    }

    async fn search(&self, term: &str) -> Result<Vec<Employee>, StoreError> {
        // The term only ever travels as a bound parameter, never as query text.
        let pattern = format!("%{}%", term);
        let sql = format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE (name ILIKE $1 OR email ILIKE $1 OR "position" ILIKE $1)
              AND deleted_at IS NULL
            ORDER BY id
            "#
        );

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn get_active(&self, id: i32) -> Result<Employee, StoreError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: i32, patch: &EmployeePatch) -> Result<Employee, StoreError> {
        let sql = format!(
            r#"
            UPDATE employees SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                department = COALESCE($4, department),
                "position" = COALESCE($5, "position"),
                salary = COALESCE($6, salary),
                updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.email.as_deref())
            .bind(patch.department.as_deref())
            .bind(patch.position.as_deref())
            .bind(patch.salary)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate_unique_violation)?
            .ok_or(StoreError::NotFound)
    }

    async fn soft_delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE employees SET deleted_at = now(), updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
