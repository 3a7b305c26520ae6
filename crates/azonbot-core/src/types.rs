//! Wire types shared across the workspace: the six daily prayers, subscriber
//! records from the directory roster, and mosque records for onboarding.

use serde::{Deserialize, Serialize};

/// The six daily prayer events, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Bomdod,
    Quyosh,
    Peshin,
    Asr,
    Shom,
    Xufton,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Bomdod,
        Prayer::Quyosh,
        Prayer::Peshin,
        Prayer::Asr,
        Prayer::Shom,
        Prayer::Xufton,
    ];

    /// Display label, as shown in outgoing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Prayer::Bomdod => "Bomdod",
            Prayer::Quyosh => "Quyosh",
            Prayer::Peshin => "Peshin",
            Prayer::Asr => "Asr",
            Prayer::Shom => "Shom",
            Prayer::Xufton => "Xufton",
        }
    }

    /// Lower-case key, as used by the directory's profile objects.
    pub fn key(&self) -> &'static str {
        match self {
            Prayer::Bomdod => "bomdod",
            Prayer::Quyosh => "quyosh",
            Prayer::Peshin => "peshin",
            Prayer::Asr => "asr",
            Prayer::Shom => "shom",
            Prayer::Xufton => "xufton",
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-mosque display times, keyed by lower-case prayer name on the wire.
/// Any field may be absent in a malformed profile; lookup returns `None` and
/// the subscriber is skipped rather than failing the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub bomdod: Option<String>,
    pub quyosh: Option<String>,
    pub peshin: Option<String>,
    pub asr: Option<String>,
    pub shom: Option<String>,
    pub xufton: Option<String>,
}

impl PrayerTimes {
    /// Display time for one prayer, if the profile carries it.
    pub fn display_time(&self, prayer: Prayer) -> Option<&str> {
        match prayer {
            Prayer::Bomdod => self.bomdod.as_deref(),
            Prayer::Quyosh => self.quyosh.as_deref(),
            Prayer::Peshin => self.peshin.as_deref(),
            Prayer::Asr => self.asr.as_deref(),
            Prayer::Shom => self.shom.as_deref(),
            Prayer::Xufton => self.xufton.as_deref(),
        }
    }
}

/// One roster entry: a Telegram recipient bound to a mosque profile.
/// Fetched fresh from the directory on every dispatch; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub telegram_id: i64,
    #[serde(default)]
    pub masjid: PrayerTimes,
}

/// A mosque as listed during onboarding (name is all the flow needs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosqueSummary {
    pub name: String,
}

/// Full mosque card for the info menu. The directory API names the province
/// field `district` and the district field `region`; the six times sit at the
/// same level as the descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosqueInfo {
    pub name: String,
    #[serde(rename = "district")]
    pub province: String,
    #[serde(rename = "region")]
    pub district: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub location_url: String,
    #[serde(flatten)]
    pub times: PrayerTimes,
}

/// Registration payload posted when a subscriber picks a mosque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub telegram_id: i64,
    #[serde(rename = "district")]
    pub province: String,
    #[serde(rename = "region")]
    pub district: String,
    pub masjid: String,
}
