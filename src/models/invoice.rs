use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

/// A persisted invoice row. `amount` rides the DECIMAL(10,2) column as a
/// float, the same way rates and totals do elsewhere in the application.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub amount: f64,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub client_id: i64,
    pub project_id: Option<i64>,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCreate {
    pub invoice_number: String,
    pub amount: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub client_id: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
}

fn default_status() -> String {
    "pending".to_string()
}

impl InvoiceCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("invoice_number", &self.invoice_number)?;
        validate::amount("amount", self.amount)?;
        validate::required("status", &self.status)?;
        Ok(())
    }
}
