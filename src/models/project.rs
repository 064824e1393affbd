use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub client_id: i64,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub client_id: i64,
}

fn default_status() -> String {
    "active".to_string()
}

impl ProjectCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::required("status", &self.status)?;
        Ok(())
    }
}
