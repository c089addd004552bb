use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use strum_macros::{Display, EnumIter};

/// Sessions offered by the sign-up form, in display order.
pub const DEFAULT_TIME_SLOTS: [&str; 2] =
    ["北美周日晚9:30EST/6:30PST/国内周一早10:30", "国内周一晚6:30"];

/// Top-level configuration shared across crates.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RallyConfigInner {
    pub roster: RosterRules,
    pub registration: RegistrationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct RallyConfig {
    #[serde(flatten, default)]
    inner: Arc<RallyConfigInner>,
}

impl Deref for RallyConfig {
    type Target = RallyConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for RallyConfig {
    fn deref_mut(&mut self) -> &mut RallyConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Constants the allocator works with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterRules {
    /// Members in a full team.
    pub team_size: usize,
    /// Healers a full team is topped up to before standby takes a third one.
    pub healers_per_team: usize,
    /// Domestic-region members below which a team is flagged.
    pub min_domestic_per_team: usize,
    /// Valid time-slot labels, in display order.
    pub time_slots: Vec<String>,
}

impl RosterRules {
    #[must_use]
    pub fn is_known_slot(&self, label: &str) -> bool {
        self.time_slots.iter().any(|s| s == label)
    }
}

/// Weekly registration window, evaluated at a fixed UTC offset.
///
/// The window opens at `opens_on`/`opens_at_hour` and closes at `closes_on`/`closes_at_hour`;
/// it may wrap around the end of the week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub utc_offset_hours: i32,
    pub opens_on: DayOfWeek,
    pub opens_at_hour: u32,
    pub closes_on: DayOfWeek,
    pub closes_at_hour: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Days since Monday.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self as u32
    }
}

/// Where the roster snapshot lives between CLI invocations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub roster: PathBuf,
}

/// Logging knobs consumed by `rally-logger`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            team_size: 10,
            healers_per_team: 2,
            min_domestic_per_team: 2,
            time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -8,
            opens_on: DayOfWeek::Friday,
            opens_at_hour: 12,
            closes_on: DayOfWeek::Sunday,
            closes_at_hour: 12,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { roster: PathBuf::from("roster.json") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, filter: None }
    }
}
