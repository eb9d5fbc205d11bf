//! # Database Crate
//!
//! The data-access layer between the screens and the PostgreSQL store.
//!
//! ## Architectural Principles
//!
//! - **Two operations:** everything goes through the `Store` trait's `fetch`
//!   (read rows) and `call` (run a stored procedure and commit). Each is a
//!   single round-trip with its own connection.
//! - **Explicit outcomes:** zero rows is `Ok(vec![])`; every failure is a
//!   `StoreError`, with connection problems and store rejections kept apart.
//! - **Scoped connections:** a connection is released on every path, either
//!   back to a bounded pool or closed, depending on `ConnectionMode`.
//!
//! ## Public API
//!
//! - `connect`: builds a `PgStore` from the configuration.
//! - `PgStore`: the PostgreSQL implementation of `Store`, plus migrations.
//! - `DbRepository`: typed wrappers for every query and procedure.
//! - `StoreError`, `Row`, `Value`, `Param`.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod postgres;
pub mod queries;
pub mod repository;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod value;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options};
pub use error::StoreError;
pub use postgres::PgStore;
pub use repository::DbRepository;
pub use store::Store;
pub use value::{Param, Row, Value};
