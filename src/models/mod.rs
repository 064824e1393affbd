mod client;
mod invoice;
mod project;
mod user;

pub use client::{Client, ClientCreate};
pub use invoice::{Invoice, InvoiceCreate};
pub use project::{Project, ProjectCreate};
pub use user::{User, UserCreate, UserLogin};
