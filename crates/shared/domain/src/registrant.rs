//! Registrant model.
//!
//! Enum values serialize as kebab-case strings. Each value also accepts the label used by the
//! Chinese sign-up form, and an unrecognized value falls back to the form default instead of
//! failing the whole roster.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Combat role chosen at sign-up.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Role {
    #[default]
    #[strum(to_string = "melee", serialize = "近战")]
    Melee,
    #[strum(to_string = "ranged", serialize = "远程")]
    Ranged,
    #[strum(to_string = "healer", serialize = "治疗")]
    Healer,
}

/// Willingness to lead (command) a team.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Leadership {
    #[strum(to_string = "willing", serialize = "愿意")]
    Willing,
    #[default]
    #[strum(to_string = "unwilling", serialize = "不愿意")]
    Unwilling,
    #[strum(to_string = "semi-willing", serialize = "半指挥")]
    SemiWilling,
}

impl Leadership {
    /// Whether a member with this preference counts as a team leader.
    #[must_use]
    pub const fn can_lead(self) -> bool {
        matches!(self, Self::Willing | Self::SemiWilling)
    }
}

/// Familiarity with the activity, ordered from least to most experienced.
///
/// Declaration order is the tier order used by the allocator: `Novice < Familiar <
/// VeryFamiliar < Expert`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Proficiency {
    #[strum(to_string = "novice", serialize = "完全小白")]
    Novice,
    #[default]
    #[strum(to_string = "familiar", serialize = "基本熟悉")]
    Familiar,
    #[strum(to_string = "very-familiar", serialize = "非常熟悉")]
    VeryFamiliar,
    #[strum(to_string = "expert", serialize = "十鹅大佬")]
    Expert,
}

/// Parses a sign-up label, falling back to the form default for anything unrecognized.
macro_rules! lenient_label {
    ($($ty:ty),+) => {
        $(
            impl From<String> for $ty {
                fn from(label: String) -> Self {
                    label.parse().unwrap_or_default()
                }
            }
        )+
    };
}

lenient_label!(Role, Leadership, Proficiency);

/// Where the registrant connects from. `Domestic` is the value the diversity check counts.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[serde(alias = "国内")]
    #[strum(to_string = "domestic", serialize = "国内")]
    Domestic,
    #[default]
    #[serde(alias = "北美")]
    #[strum(to_string = "north-america", serialize = "北美")]
    NorthAmerica,
    #[serde(alias = "其他", other)]
    #[strum(to_string = "other", serialize = "其他")]
    Other,
}

impl Region {
    #[must_use]
    pub const fn is_domestic(self) -> bool {
        matches!(self, Self::Domestic)
    }
}

/// Label of a scheduled session. Any string is accepted; configured labels are only
/// enforced at registration time.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for TimeSlot {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for TimeSlot {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TimeSlot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single sign-up. `id` is the in-game name and the store's upsert key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub id: String,
    #[serde(alias = "job", default)]
    pub role: Role,
    #[serde(alias = "command", default)]
    pub leadership: Leadership,
    #[serde(default)]
    pub proficiency: Proficiency,
    #[serde(alias = "ip", default)]
    pub region: Region,
    #[serde(alias = "time")]
    pub time_slot: TimeSlot,
}

impl Registrant {
    /// Creates a registrant with the sign-up form defaults (melee, unwilling, familiar,
    /// north-america).
    pub fn new(id: impl Into<String>, time_slot: impl Into<TimeSlot>) -> Self {
        Self {
            id: id.into(),
            role: Role::default(),
            leadership: Leadership::default(),
            proficiency: Proficiency::default(),
            region: Region::default(),
            time_slot: time_slot.into(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_leadership(mut self, leadership: Leadership) -> Self {
        self.leadership = leadership;
        self
    }

    #[must_use]
    pub fn with_proficiency(mut self, proficiency: Proficiency) -> Self {
        self.proficiency = proficiency;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    #[must_use]
    pub fn is_healer(&self) -> bool {
        self.role == Role::Healer
    }

    #[must_use]
    pub const fn can_lead(&self) -> bool {
        self.leadership.can_lead()
    }

    #[must_use]
    pub const fn is_domestic(&self) -> bool {
        self.region.is_domestic()
    }
}
