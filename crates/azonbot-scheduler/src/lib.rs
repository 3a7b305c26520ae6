//! # Azonbot Scheduler
//!
//! The notification dispatcher core: a single tokio task polls the wall
//! clock in the configured zone, and the minute a scheduled prayer time
//! arrives it fetches the current roster and fans one personalized message
//! out to every subscriber — exactly once per occurrence.
//!
//! ```text
//! Dispatcher (tokio interval, < 60s period)
//!   ├── PrayerSchedule: 04:56 → Bomdod, ..., 18:50 → Xufton
//!   ├── minute match & not yet handled → DirectoryClient.fetch_subscribers()
//!   ├── fan-out: one Markdown message per subscriber, bounded concurrency
//!   └── mark minute handled → same slot cannot re-fire until the clock moves
//! ```

pub mod detector;
pub mod dispatch;
pub mod schedule;

pub use detector::{DispatchOptions, OccurrenceDetector, run_dispatcher};
pub use dispatch::{dispatch, render_message};
pub use schedule::PrayerSchedule;
