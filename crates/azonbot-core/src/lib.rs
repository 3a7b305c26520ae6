//! # Azonbot Core
//! Shared foundation for the Azonbot workspace: configuration, the error
//! taxonomy, wire types for the directory API, and the `Notifier` seam that
//! decouples dispatch from the delivery transport.

pub mod config;
pub mod error;
pub mod notify;
pub mod types;

pub use config::AzonConfig;
pub use error::{AzonError, Result};
pub use notify::Notifier;
pub use types::{MosqueInfo, MosqueSummary, Prayer, PrayerTimes, Registration, Subscriber};
