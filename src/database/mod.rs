//! chromeguard database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! remembered per-site permission decisions.
//!
//! # Usage
//!
//! ```no_run
//! use chromeguard::database::Database;
//!
//! let db = Database::open("chromeguard.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
