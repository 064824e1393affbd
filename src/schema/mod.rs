//! Declarative schema for the business database.
//!
//! Tables are data: each [`TableDef`] renders to a single
//! `CREATE TABLE IF NOT EXISTS` statement and [`ensure_schema`] replays the
//! full list on startup. Replaying against an already-initialized file is a
//! no-op: no error, no data loss.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub foreign_keys: Vec<ForeignKeyDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Integer,
    Text,
    Decimal { precision: u8, scale: u8 },
    Date,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    CurrentTimestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ColumnDef {
    fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }

    /// INTEGER PRIMARY KEY AUTOINCREMENT; every table here uses one.
    fn id() -> Self {
        let mut col = Self::new("id", ColumnType::Integer);
        col.primary_key = true;
        col
    }

    fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.ty.sql());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        match &self.default {
            Some(DefaultValue::Text(text)) => sql.push_str(&format!(" DEFAULT '{text}'")),
            Some(DefaultValue::CurrentTimestamp) => sql.push_str(" DEFAULT CURRENT_TIMESTAMP"),
            None => {}
        }
        sql
    }
}

impl ColumnType {
    fn sql(&self) -> String {
        match self {
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Decimal { precision, scale } => format!("DECIMAL({precision},{scale})"),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

impl TableDef {
    /// Render the full CREATE TABLE statement for this definition.
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDef::sql).collect();
        for fk in &self.foreign_keys {
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.column, fk.references_table, fk.references_column
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            parts.join(", ")
        )
    }
}

fn created_at() -> ColumnDef {
    ColumnDef::new("created_at", ColumnType::Timestamp).with_default(DefaultValue::CurrentTimestamp)
}

fn references(column: &'static str, table: &'static str) -> ForeignKeyDef {
    ForeignKeyDef {
        column,
        references_table: table,
        references_column: "id",
    }
}

fn users() -> TableDef {
    TableDef {
        name: "users",
        columns: vec![
            ColumnDef::id(),
            ColumnDef::new("email", ColumnType::Text).unique().not_null(),
            ColumnDef::new("password_hash", ColumnType::Text).not_null(),
            ColumnDef::new("name", ColumnType::Text).not_null(),
            created_at(),
        ],
        foreign_keys: vec![],
    }
}

fn clients() -> TableDef {
    TableDef {
        name: "clients",
        columns: vec![
            ColumnDef::id(),
            ColumnDef::new("name", ColumnType::Text).not_null(),
            ColumnDef::new("email", ColumnType::Text),
            ColumnDef::new("phone", ColumnType::Text),
            ColumnDef::new("address", ColumnType::Text),
            ColumnDef::new("user_id", ColumnType::Integer).not_null(),
            created_at(),
        ],
        foreign_keys: vec![references("user_id", "users")],
    }
}

fn projects() -> TableDef {
    TableDef {
        name: "projects",
        columns: vec![
            ColumnDef::id(),
            ColumnDef::new("name", ColumnType::Text).not_null(),
            ColumnDef::new("description", ColumnType::Text),
            ColumnDef::new("status", ColumnType::Text).with_default(DefaultValue::Text("active")),
            ColumnDef::new("client_id", ColumnType::Integer).not_null(),
            ColumnDef::new("user_id", ColumnType::Integer).not_null(),
            created_at(),
        ],
        foreign_keys: vec![references("client_id", "clients"), references("user_id", "users")],
    }
}

fn invoices() -> TableDef {
    TableDef {
        name: "invoices",
        columns: vec![
            ColumnDef::id(),
            ColumnDef::new("invoice_number", ColumnType::Text).unique().not_null(),
            ColumnDef::new("amount", ColumnType::Decimal { precision: 10, scale: 2 }).not_null(),
            ColumnDef::new("status", ColumnType::Text).with_default(DefaultValue::Text("pending")),
            ColumnDef::new("due_date", ColumnType::Date),
            ColumnDef::new("client_id", ColumnType::Integer).not_null(),
            ColumnDef::new("project_id", ColumnType::Integer),
            ColumnDef::new("user_id", ColumnType::Integer).not_null(),
            created_at(),
        ],
        foreign_keys: vec![
            references("client_id", "clients"),
            references("project_id", "projects"),
            references("user_id", "users"),
        ],
    }
}

/// The four tables, ordered so every referenced table is created before its
/// dependents.
pub fn tables() -> Vec<TableDef> {
    vec![users(), clients(), projects(), invoices()]
}

/// Create every table that does not exist yet. Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for table in tables() {
        debug!(table = table.name, "ensuring table");
        sqlx::query(&table.create_sql()).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_ddl_matches_declared_layout() {
        let sql = users().create_sql();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS users (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             email TEXT UNIQUE NOT NULL, \
             password_hash TEXT NOT NULL, \
             name TEXT NOT NULL, \
             created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
        );
    }

    #[test]
    fn invoices_ddl_declares_all_references() {
        let sql = invoices().create_sql();
        assert!(sql.contains("invoice_number TEXT UNIQUE NOT NULL"));
        assert!(sql.contains("amount DECIMAL(10,2) NOT NULL"));
        assert!(sql.contains("status TEXT DEFAULT 'pending'"));
        assert!(sql.contains("FOREIGN KEY (client_id) REFERENCES clients (id)"));
        assert!(sql.contains("FOREIGN KEY (project_id) REFERENCES projects (id)"));
        assert!(sql.contains("FOREIGN KEY (user_id) REFERENCES users (id)"));
    }

    #[test]
    fn tables_are_ordered_parents_first() {
        let names: Vec<&str> = tables().iter().map(|t| t.name).collect();
        assert_eq!(names, ["users", "clients", "projects", "invoices"]);
    }

    #[test]
    fn project_status_defaults_to_active() {
        let sql = projects().create_sql();
        assert!(sql.contains("status TEXT DEFAULT 'active'"));
    }
}
