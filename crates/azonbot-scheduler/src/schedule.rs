//! The daily event schedule: an immutable minute→prayer mapping.

use azonbot_core::config::ScheduleConfig;
use azonbot_core::error::{AzonError, Result};
use azonbot_core::types::Prayer;
use chrono::NaiveTime;

/// Read-only mapping from a minute of the day to the prayer occurring then.
/// Built once at startup; a schedule change requires a restart.
#[derive(Debug, Clone)]
pub struct PrayerSchedule {
    slots: Vec<(NaiveTime, Prayer)>,
}

impl PrayerSchedule {
    /// Build a schedule, normalizing every slot to second zero. Two slots on
    /// the same minute would alias through the single dedup key, so that is
    /// rejected here rather than detected at 4am in production.
    pub fn new(entries: Vec<(NaiveTime, Prayer)>) -> Result<Self> {
        let mut slots: Vec<(NaiveTime, Prayer)> = Vec::with_capacity(entries.len());
        for (time, prayer) in entries {
            let minute = truncate_to_minute(time);
            if let Some((_, other)) = slots.iter().find(|(t, _)| *t == minute) {
                return Err(AzonError::Config(format!(
                    "duplicate schedule slot {}: {} and {}",
                    minute.format("%H:%M"),
                    other.key(),
                    prayer.key()
                )));
            }
            slots.push((minute, prayer));
        }
        Ok(Self { slots })
    }

    /// Build from the six configured "HH:MM" strings.
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        Self::new(config.entries()?)
    }

    /// The prayer occurring at `minute`, if any. Pure lookup.
    pub fn prayer_at(&self, minute: NaiveTime) -> Option<Prayer> {
        self.slots
            .iter()
            .find(|(t, _)| *t == minute)
            .map(|(_, p)| *p)
    }

    pub fn slots(&self) -> &[(NaiveTime, Prayer)] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Drop seconds and sub-seconds, keeping hour and minute.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    use chrono::Timelike;
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
