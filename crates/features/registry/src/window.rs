use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use rally_domain::WindowOverride;
use rally_domain::config::{DayOfWeek, RegistrationConfig};
use serde::Serialize;
use strum_macros::Display;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// What decided whether registration is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatusSource {
    /// The weekly schedule.
    Automatic,
    /// An administrator override.
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationStatus {
    pub open: bool,
    pub source: StatusSource,
}

impl RegistrationStatus {
    #[must_use]
    pub const fn forced_open() -> Self {
        Self { open: true, source: StatusSource::Override }
    }

    #[must_use]
    pub const fn forced_closed() -> Self {
        Self { open: false, source: StatusSource::Override }
    }
}

/// Whether registration is open at `now`. An override always wins over the weekly schedule.
///
/// # Examples
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rally_domain::config::RegistrationConfig;
/// use rally_registry::window::registration_status;
///
/// // Saturday 03:00 at UTC-8.
/// let now = Utc.with_ymd_and_hms(2026, 10, 17, 11, 0, 0).unwrap();
/// assert!(registration_status(now, &RegistrationConfig::default(), None).open);
/// ```
#[must_use]
pub fn registration_status(
    now: DateTime<Utc>,
    config: &RegistrationConfig,
    window_override: Option<WindowOverride>,
) -> RegistrationStatus {
    match window_override {
        Some(WindowOverride::Open) => RegistrationStatus::forced_open(),
        Some(WindowOverride::Closed) => RegistrationStatus::forced_closed(),
        None => {
            RegistrationStatus { open: is_scheduled_open(now, config), source: StatusSource::Automatic }
        },
    }
}

/// The weekly schedule alone, evaluated at the configured UTC offset.
///
/// The window runs from the opening minute (inclusive) to the closing minute (exclusive) and may
/// wrap past Sunday midnight. Equal opening and closing times mean never open, and so does an
/// offset outside ±23 hours.
#[must_use]
pub fn is_scheduled_open(now: DateTime<Utc>, config: &RegistrationConfig) -> bool {
    let Some(offset) =
        config.utc_offset_hours.checked_mul(3600).and_then(FixedOffset::east_opt)
    else {
        tracing::warn!(offset = config.utc_offset_hours, "UTC offset out of range, window closed");
        return false;
    };
    let local = now.with_timezone(&offset);

    let minute = local.weekday().num_days_from_monday() * MINUTES_PER_DAY
        + local.hour() * 60
        + local.minute();
    let opens = minute_of_week(config.opens_on, config.opens_at_hour);
    let closes = minute_of_week(config.closes_on, config.closes_at_hour);

    if opens <= closes {
        (opens..closes).contains(&minute)
    } else {
        minute >= opens || minute < closes
    }
}

fn minute_of_week(day: DayOfWeek, hour: u32) -> u32 {
    day.offset() * MINUTES_PER_DAY + hour.min(24) * 60
}
