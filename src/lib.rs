//! Data layer for a small business-management application.
//!
//! Owns the relational schema (users, clients, projects, invoices), the
//! pooled connection contract, and the per-entity create/read shapes applied
//! at the storage boundary. Statement execution beyond the operations on
//! [`db::Database`] belongs to the caller, which works through a connection
//! from [`db::Database::acquire`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod validate;

pub use db::{Database, init};
pub use error::{StoreError, ValidationError};
