//! # ReservaFacil Database Crate
//!
//! This crate is the only place that talks to PostgreSQL. It owns the
//! connection pool, the embedded schema migrations and every SQL statement
//! the services run.
//!
//! ## Public API
//!
//! - `connect`: builds the lazily-connecting, shared connection pool.
//! - `run_migrations`: applies `./migrations` (tables `mesas`, `reservas`,
//!   `auditoria` and the audit trigger).
//! - `DbRepository`: holds the pool and provides the data access methods
//!   (`list_reservations`, `create_reservation`, `delete_reservation`, ...).
//! - `DbError`: the error type, with slot conflicts and missing rows
//!   classified apart from genuine database faults.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod row;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, ping, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use sqlx::PgPool;
