use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;

use employee_directory_api::config::SecurityConfig;
use employee_directory_api::database::models::{Employee, EmployeePatch, NewEmployee};
use employee_directory_api::database::store::{EmployeeStore, StoreError};
use employee_directory_api::{app, AppState};

/// In-memory stand-in for the Postgres store, faithful to its contract:
/// reads and writes are scoped to active rows, a duplicate active email is
/// rejected, and deletes only mark `deleted_at`.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    rows: Mutex<Vec<Employee>>,
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(
        &self,
        input: &NewEmployee,
        password_hash: &str,
    ) -> Result<Employee, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|e| e.deleted_at.is_none() && e.email == input.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let employee = Employee {
            id: rows.len() as i32 + 1,
            name: input.name.clone(),
            email: input.email.clone(),
            department: input.department.clone(),
            position: input.position.clone(),
            salary: input.salary,
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(employee.clone());
        Ok(employee)
    }

    async fn list_active(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|e| e.deleted_at.is_none()).cloned().collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Employee>, StoreError> {
        let needle = term.to_lowercase();
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|e| e.deleted_at.is_none())
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.email.to_lowercase().contains(&needle)
                    || e.position.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn get_active(&self, id: i32) -> Result<Employee, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|e| e.id == id && e.deleted_at.is_none())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: i32, patch: &EmployeePatch) -> Result<Employee, StoreError> {
        let mut rows = self.rows.lock().unwrap();

        if let Some(email) = &patch.email {
            if rows.iter().any(|e| e.id != id && e.deleted_at.is_none() && &e.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let row = rows
            .iter_mut()
            .find(|e| e.id == id && e.deleted_at.is_none())
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        if let Some(department) = &patch.department {
            row.department = department.clone();
        }
        if let Some(position) = &patch.position {
            row.position = position.clone();
        }
        if let Some(salary) = patch.salary {
            row.salary = salary;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: i32) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id && e.deleted_at.is_none())
            .ok_or(StoreError::NotFound)?;

        let now = Utc::now();
        row.deleted_at = Some(now);
        row.updated_at = now;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig {
        cors_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// Router over a fresh in-memory store.
pub fn test_app() -> Router {
    let state = AppState {
        store: Arc::new(MemoryEmployeeStore::default()),
    };
    app(state, &test_security())
}

/// Sends one request through the router and returns (status, parsed body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let raw = body.map(|json| json.to_string());
    send_raw(app, method, uri, raw).await
}

/// Like `send`, but with a raw string body (for malformed-JSON cases).
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(raw) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
