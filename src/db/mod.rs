use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{
    Client, ClientCreate, Invoice, InvoiceCreate, Project, ProjectCreate, User, UserCreate,
};
use crate::schema;

/// Database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(config.connect_options()?)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check a connection out of the pool for callers issuing their own
    /// statements. The checkout returns to the pool when dropped, on every
    /// exit path.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    // User operations

    /// Insert a registration row and return it as stored.
    ///
    /// `password_hash` comes from the authentication layer; the plaintext
    /// password in the create shape is validated here but never persisted.
    pub async fn create_user(
        &self,
        input: &UserCreate,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        input.validate()?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.email)
        .bind(password_hash)
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await?;

        self.get_user(id).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Login lookup; `None` when the address is unknown.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // Client operations

    pub async fn create_client(
        &self,
        user_id: i64,
        input: &ClientCreate,
    ) -> Result<Client, StoreError> {
        input.validate()?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO clients (name, email, phone, address, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_client(id).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, StoreError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn list_clients(&self, user_id: i64) -> Result<Vec<Client>, StoreError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE user_id = ? ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn update_client(&self, client: &Client) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = ?, email = ?, phone = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fails with [`StoreError::ForeignKey`] while projects or invoices still
    /// reference the client.
    pub async fn delete_client(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Project operations

    pub async fn create_project(
        &self,
        user_id: i64,
        input: &ProjectCreate,
    ) -> Result<Project, StoreError> {
        input.validate()?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO projects (name, description, status, client_id, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.status)
        .bind(input.client_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_project(id).await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(project)
    }

    pub async fn list_projects(&self, client_id: i64) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE client_id = ? ORDER BY name ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn update_project(&self, project: &Project) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, description = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.status)
        .bind(project.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Invoice operations

    pub async fn create_invoice(
        &self,
        user_id: i64,
        input: &InvoiceCreate,
    ) -> Result<Invoice, StoreError> {
        input.validate()?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO invoices (invoice_number, amount, status, due_date, client_id, project_id, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.invoice_number)
        .bind(input.amount)
        .bind(&input.status)
        .bind(input.due_date)
        .bind(input.client_id)
        .bind(input.project_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_invoice(id).await
    }

    pub async fn get_invoice(&self, id: i64) -> Result<Invoice, StoreError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn list_invoices(&self, client_id: i64) -> Result<Vec<Invoice>, StoreError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE client_id = ? ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn update_invoice(&self, invoice: &Invoice) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET amount = ?, status = ?, due_date = ?, project_id = ?
            WHERE id = ?
            "#,
        )
        .bind(invoice.amount)
        .bind(&invoice.status)
        .bind(invoice.due_date)
        .bind(invoice.project_id)
        .bind(invoice.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_invoice(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Open the database and make sure every table exists
pub async fn init(config: &Config) -> Result<Database, StoreError> {
    let db = Database::connect(config).await?;

    schema::ensure_schema(db.pool()).await?;
    info!(url = config.database_url(), "database ready");

    Ok(db)
}
