use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

/// A persisted user row.
///
/// The stored credential is an opaque hash produced by the authentication
/// layer; it is deserialized from the row but never serialized outward.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Registration input. The plaintext password is consumed by the hashing
/// collaborator downstream and is never written to the database.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::email("email", &self.email)?;
        validate::required("name", &self.name)?;
        validate::required("password", &self.password)?;
        Ok(())
    }
}

/// Credentials presented at login. Checked against a stored row, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

impl UserLogin {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::email("email", &self.email)?;
        validate::required("password", &self.password)?;
        Ok(())
    }
}
