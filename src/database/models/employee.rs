use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row in the `employees` table.
///
/// The credential hash and the soft-delete marker are storage concerns and
/// never appear in serialized output.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create payload. Missing fields default to empty / zero so the validator
/// can report them individually instead of the deserializer rejecting the
/// whole body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: Decimal,
}

/// Partial update payload. Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
}
