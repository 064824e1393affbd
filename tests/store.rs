use business_db::config::Config;
use business_db::db::{self, Database};
use business_db::error::{StoreError, ValidationError};
use business_db::models::{ClientCreate, InvoiceCreate, ProjectCreate, UserCreate};
use tempfile::NamedTempFile;

// Helper to open a fresh file-backed database; the temp file must outlive the pool.
async fn open_db() -> (Database, NamedTempFile) {
    let file = NamedTempFile::new().expect("temp file");
    let config = test_config(&file);
    let db = db::init(&config).await.expect("init database");
    (db, file)
}

fn test_config(file: &NamedTempFile) -> Config {
    Config::with_database_url(format!("sqlite:{}", file.path().display()))
}

fn user_input(email: &str) -> UserCreate {
    UserCreate {
        email: email.into(),
        name: "Ada".into(),
        password: "secret".into(),
    }
}

fn client_input(name: &str) -> ClientCreate {
    ClientCreate {
        name: name.into(),
        email: None,
        phone: None,
        address: None,
    }
}

fn invoice_input(number: &str, client_id: i64) -> InvoiceCreate {
    InvoiceCreate {
        invoice_number: number.into(),
        amount: 100.00,
        status: "pending".into(),
        due_date: None,
        client_id,
        project_id: None,
    }
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let (db, file) = open_db().await;
    let user = db
        .create_user(&user_input("a@b.com"), "hash")
        .await
        .expect("create user");

    // A second init against the same file must neither fail nor lose rows.
    let db2 = db::init(&test_config(&file)).await.expect("re-init");
    let found = db2
        .get_user_by_email("a@b.com")
        .await
        .expect("lookup")
        .expect("row survived");
    assert_eq!(found.id, user.id);

    drop(db);
}

#[tokio::test]
async fn user_round_trips_and_rejects_duplicate_email() {
    let (db, _file) = open_db().await;

    let user = db
        .create_user(&user_input("a@b.com"), "hash-1")
        .await
        .expect("create user");
    assert!(user.id > 0);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.password_hash, "hash-1");

    let err = db
        .create_user(&user_input("a@b.com"), "hash-2")
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, StoreError::Unique(_)), "got {err:?}");
}

#[tokio::test]
async fn validation_rejects_before_any_write() {
    let (db, _file) = open_db().await;

    let err = db
        .create_user(&user_input("not-an-address"), "hash")
        .await
        .expect_err("malformed email");
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::InvalidEmail { field: "email", .. })
    ));

    let mut input = user_input("c@d.com");
    input.name = "".into();
    let err = db.create_user(&input, "hash").await.expect_err("empty name");
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::Missing("name"))
    ));

    // The failed attempts wrote nothing.
    assert!(db.get_user_by_email("c@d.com").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_email_lookup_is_none() {
    let (db, _file) = open_db().await;
    assert!(db.get_user_by_email("ghost@b.com").await.unwrap().is_none());
}

#[tokio::test]
async fn client_round_trip_and_user_scoping() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();

    let client = db
        .create_client(user.id, &client_input("Acme"))
        .await
        .expect("create client");
    assert!(client.id > 0);
    assert_eq!(client.name, "Acme");
    assert_eq!(client.user_id, user.id);
    assert_eq!(client.email, None);
    assert_eq!(client.phone, None);
    assert_eq!(client.address, None);

    let listed = db.list_clients(user.id).await.expect("list clients");
    assert_eq!(listed.len(), 1);
    assert!(db.list_clients(user.id + 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn client_requires_existing_user() {
    let (db, _file) = open_db().await;
    let err = db
        .create_client(999, &client_input("Orphan"))
        .await
        .expect_err("missing user");
    assert!(matches!(err, StoreError::ForeignKey(_)), "got {err:?}");
}

#[tokio::test]
async fn project_defaults_and_references() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let client = db.create_client(user.id, &client_input("Acme")).await.unwrap();

    let project = db
        .create_project(
            user.id,
            &ProjectCreate {
                name: "Website".into(),
                description: None,
                status: "active".into(),
                client_id: client.id,
            },
        )
        .await
        .expect("create project");
    assert_eq!(project.status, "active");
    assert_eq!(project.client_id, client.id);
    assert_eq!(project.user_id, user.id);

    let err = db
        .create_project(
            user.id,
            &ProjectCreate {
                name: "Dangling".into(),
                description: None,
                status: "active".into(),
                client_id: 999,
            },
        )
        .await
        .expect_err("missing client");
    assert!(matches!(err, StoreError::ForeignKey(_)));
}

#[tokio::test]
async fn status_column_defaults_apply_to_raw_inserts() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let client = db.create_client(user.id, &client_input("Acme")).await.unwrap();

    // Callers issuing their own statements get the declared column defaults.
    let mut conn = db.acquire().await.expect("checkout");
    sqlx::query("INSERT INTO projects (name, client_id, user_id) VALUES (?, ?, ?)")
        .bind("Bare")
        .bind(client.id)
        .bind(user.id)
        .execute(&mut *conn)
        .await
        .expect("raw insert");
    drop(conn);

    let projects = db.list_projects(client.id).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].status, "active");
}

#[tokio::test]
async fn invoice_round_trip_defaults_and_uniqueness() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let client = db.create_client(user.id, &client_input("Acme")).await.unwrap();

    let invoice = db
        .create_invoice(user.id, &invoice_input("INV-001", client.id))
        .await
        .expect("create invoice");
    assert!(invoice.id > 0);
    assert_eq!(invoice.invoice_number, "INV-001");
    assert_eq!(invoice.amount, 100.00);
    assert_eq!(invoice.status, "pending");
    assert_eq!(invoice.due_date, None);
    assert_eq!(invoice.project_id, None);

    let err = db
        .create_invoice(user.id, &invoice_input("INV-001", client.id))
        .await
        .expect_err("duplicate number");
    assert!(matches!(err, StoreError::Unique(_)), "got {err:?}");
}

#[tokio::test]
async fn invoice_references_are_checked() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let client = db.create_client(user.id, &client_input("Acme")).await.unwrap();

    let err = db
        .create_invoice(user.id, &invoice_input("INV-001", 999))
        .await
        .expect_err("missing client");
    assert!(matches!(err, StoreError::ForeignKey(_)));

    let mut input = invoice_input("INV-002", client.id);
    input.project_id = Some(999);
    let err = db
        .create_invoice(user.id, &input)
        .await
        .expect_err("missing project");
    assert!(matches!(err, StoreError::ForeignKey(_)));

    let project = db
        .create_project(
            user.id,
            &ProjectCreate {
                name: "Website".into(),
                description: None,
                status: "active".into(),
                client_id: client.id,
            },
        )
        .await
        .unwrap();
    let mut input = invoice_input("INV-003", client.id);
    input.project_id = Some(project.id);
    let invoice = db.create_invoice(user.id, &input).await.expect("valid project ref");
    assert_eq!(invoice.project_id, Some(project.id));
}

#[tokio::test]
async fn deleting_referenced_rows_is_rejected() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let client = db.create_client(user.id, &client_input("Acme")).await.unwrap();
    let project = db
        .create_project(
            user.id,
            &ProjectCreate {
                name: "Website".into(),
                description: None,
                status: "active".into(),
                client_id: client.id,
            },
        )
        .await
        .unwrap();

    let err = db.delete_client(client.id).await.expect_err("client still referenced");
    assert!(matches!(err, StoreError::ForeignKey(_)));

    // Dependents first, then the parent goes through.
    db.delete_project(project.id).await.expect("delete project");
    db.delete_client(client.id).await.expect("delete client");
    assert!(db.list_clients(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn updates_persist() {
    let (db, _file) = open_db().await;
    let user = db.create_user(&user_input("a@b.com"), "hash").await.unwrap();
    let mut client = db.create_client(user.id, &client_input("Acme")).await.unwrap();
    let mut invoice = db
        .create_invoice(user.id, &invoice_input("INV-001", client.id))
        .await
        .unwrap();

    client.email = Some("billing@acme.test".into());
    db.update_client(&client).await.expect("update client");
    let reloaded = db.get_client(client.id).await.unwrap();
    assert_eq!(reloaded.email.as_deref(), Some("billing@acme.test"));

    invoice.status = "paid".into();
    db.update_invoice(&invoice).await.expect("update invoice");
    let reloaded = db.get_invoice(invoice.id).await.unwrap();
    assert_eq!(reloaded.status, "paid");
}

#[tokio::test]
async fn missing_rows_surface_not_found() {
    let (db, _file) = open_db().await;
    let err = db.get_client(42).await.expect_err("no such row");
    assert!(matches!(err, StoreError::NotFound), "got {err:?}");
}
