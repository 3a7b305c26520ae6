//! Minute-occurrence detection and the dispatcher loop.

use std::sync::Arc;
use std::time::Duration;

use azonbot_core::config::DispatcherConfig;
use azonbot_core::notify::Notifier;
use azonbot_core::types::Prayer;
use azonbot_directory::DirectoryClient;
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::dispatch::dispatch;
use crate::schedule::{PrayerSchedule, truncate_to_minute};

/// Dispatcher loop tuning, resolved from config at startup.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub poll_interval: Duration,
    pub send_concurrency: usize,
    pub dispatch_deadline: Duration,
}

impl From<&DispatcherConfig> for DispatchOptions {
    fn from(config: &DispatcherConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            send_concurrency: config.send_concurrency,
            dispatch_deadline: Duration::from_secs(config.dispatch_deadline_secs),
        }
    }
}

/// Decides whether the current wall-clock minute is a not-yet-handled slot.
///
/// The dedup key is the time-of-day of the last completed dispatch, owned
/// exclusively by the loop that drives this value — nothing else reads or
/// writes it, so no synchronization is involved. It is not persisted: a
/// restart during a scheduled minute will dispatch again.
#[derive(Debug)]
pub struct OccurrenceDetector {
    schedule: PrayerSchedule,
    offset: FixedOffset,
    last_dispatched: Option<NaiveTime>,
}

impl OccurrenceDetector {
    pub fn new(schedule: PrayerSchedule, offset: FixedOffset) -> Self {
        Self {
            schedule,
            offset,
            last_dispatched: None,
        }
    }

    /// The current minute of the day in the configured zone.
    pub fn current_minute(&self, now: DateTime<Utc>) -> NaiveTime {
        truncate_to_minute(now.with_timezone(&self.offset).time())
    }

    /// The prayer due at `minute`, unless that exact minute was already
    /// handled. Repeated polls inside one minute return `Some` only until
    /// the dispatch completes and `mark_dispatched` runs.
    pub fn due(&self, minute: NaiveTime) -> Option<Prayer> {
        if self.last_dispatched == Some(minute) {
            return None;
        }
        self.schedule.prayer_at(minute)
    }

    /// Record a completed dispatch. Called only after the fan-out attempt
    /// has finished, so a crash mid-fan-out never marks the slot handled.
    pub fn mark_dispatched(&mut self, minute: NaiveTime) {
        self.last_dispatched = Some(minute);
    }

    pub fn last_dispatched(&self) -> Option<NaiveTime> {
        self.last_dispatched
    }
}

/// The dispatcher loop. Single task, one tick at a time: a slow fan-out
/// simply delays the next tick, it can never overlap with another dispatch.
pub async fn run_dispatcher(
    mut detector: OccurrenceDetector,
    directory: Arc<DirectoryClient>,
    notifier: Arc<dyn Notifier>,
    options: DispatchOptions,
) {
    tracing::info!(
        "⏰ Dispatcher started ({} slots, poll every {}s)",
        detector.schedule.len(),
        options.poll_interval.as_secs()
    );

    let mut interval = tokio::time::interval(options.poll_interval);

    loop {
        interval.tick().await;

        let minute = detector.current_minute(Utc::now());
        let Some(prayer) = detector.due(minute) else {
            continue;
        };
        tracing::info!("🔔 {} time reached ({})", prayer, minute.format("%H:%M"));

        // Roster is fetched fresh per occurrence. On failure the slot stays
        // unmarked, so a later tick within the same minute retries.
        let roster = match directory.fetch_subscribers().await {
            Ok(roster) => roster,
            Err(e) => {
                tracing::warn!("⚠️ Roster fetch failed, retrying next tick: {e}");
                continue;
            }
        };

        let fan_out = dispatch(prayer, &roster, notifier.as_ref(), options.send_concurrency);
        match tokio::time::timeout(options.dispatch_deadline, fan_out).await {
            Ok(attempted) => {
                tracing::info!(
                    "✅ Sent '{}' notifications to {}/{} subscriber(s)",
                    prayer,
                    attempted,
                    roster.len()
                );
            }
            Err(_) => {
                tracing::warn!(
                    "⚠️ '{}' dispatch exceeded the {}s deadline, moving on",
                    prayer,
                    options.dispatch_deadline.as_secs()
                );
            }
        }

        // Sends were launched either way; marking here keeps the minute from
        // double-firing on the next tick.
        detector.mark_dispatched(minute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azonbot_core::config::ScheduleConfig;
    use chrono::TimeZone;

    fn tashkent() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600).unwrap()
    }

    fn detector() -> OccurrenceDetector {
        let schedule = PrayerSchedule::from_config(&ScheduleConfig::default()).unwrap();
        OccurrenceDetector::new(schedule, tashkent())
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_unscheduled_minutes_never_fire() {
        let det = detector();
        assert_eq!(det.due(hm(4, 57)), None);
        assert_eq!(det.due(hm(13, 0)), None);
        assert_eq!(det.due(hm(23, 59)), None);
    }

    #[test]
    fn test_scheduled_minute_fires_exactly_once() {
        let mut det = detector();
        let minute = hm(4, 56);

        // First poll inside the minute
        assert_eq!(det.due(minute), Some(Prayer::Bomdod));
        det.mark_dispatched(minute);

        // Later polls inside the same minute are suppressed
        assert_eq!(det.due(minute), None);
        assert_eq!(det.due(hm(4, 57)), None);
    }

    #[test]
    fn test_unmarked_slot_stays_due() {
        // A failed roster fetch does not mark the slot; the same minute can
        // still trigger on the next tick.
        let det = detector();
        let minute = hm(11, 59);
        assert_eq!(det.due(minute), Some(Prayer::Peshin));
        assert_eq!(det.due(minute), Some(Prayer::Peshin));
    }

    #[test]
    fn test_next_slot_fires_after_previous_marked() {
        let mut det = detector();
        det.mark_dispatched(hm(4, 56));
        assert_eq!(det.due(hm(5, 32)), Some(Prayer::Quyosh));
    }

    #[test]
    fn test_same_time_next_day_fires_again() {
        // Dedup is time-of-day only: once a later slot has been handled,
        // the earlier minute is due again when the clock comes back around.
        let mut det = detector();
        det.mark_dispatched(hm(4, 56));
        assert_eq!(det.due(hm(4, 56)), None);

        det.mark_dispatched(hm(18, 50));
        assert_eq!(det.due(hm(4, 56)), Some(Prayer::Bomdod));
    }

    #[test]
    fn test_current_minute_converts_and_truncates() {
        let det = detector();
        // 23:56:03 UTC == 04:56:03 in Tashkent
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 23, 56, 3).unwrap();
        assert_eq!(det.current_minute(now), hm(4, 56));
    }

    #[test]
    fn test_bomdod_scenario() {
        // schedule = {04:56 → Bomdod}; ticks at 04:56:03, 04:56:11, 04:57:00.
        let mut det = detector();

        let tick1 = Utc.with_ymd_and_hms(2026, 3, 9, 23, 56, 3).unwrap();
        let minute = det.current_minute(tick1);
        assert_eq!(det.due(minute), Some(Prayer::Bomdod));
        det.mark_dispatched(minute);
        assert_eq!(det.last_dispatched(), Some(hm(4, 56)));

        let tick2 = Utc.with_ymd_and_hms(2026, 3, 9, 23, 56, 11).unwrap();
        assert_eq!(det.due(det.current_minute(tick2)), None);

        let tick3 = Utc.with_ymd_and_hms(2026, 3, 9, 23, 57, 0).unwrap();
        assert_eq!(det.due(det.current_minute(tick3)), None);
    }
}
