//! Reporting engine for scheduled TV-platform activities.
//!
//! The export is loaded once into an immutable `Vec<Activity>`; every report
//! is a pure function over a slice of it.
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod loader;
pub mod memo;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;

pub use error::{AppError, Result};
pub use filters::{DateRange, KindFilter};
pub use types::{Activity, ActivityKind, Area, DemandSource, Equipment, Status};
