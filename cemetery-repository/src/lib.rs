//! # Cemetery Repository
//! This crate provides traits and implementations for storing bodies and
//! graves and for burying bodies into graves without ever exceeding a grave's
//! capacity. It includes the error taxonomy, the validation rules, the
//! repository interfaces and a concrete implementation for SQLite.
mod arguments;
pub mod clock;
pub mod errors;
pub mod interfaces;
pub mod sqlite;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ErrorKind, ManagerError};
pub use interfaces::{BodyRepository, CemeteryRepository, GraveRepository};
pub use sqlite::{
    run_migrations, with_transaction, SqliteBodyRepository, SqliteCemeteryRepository,
    SqliteGraveRepository, MIGRATOR,
};
