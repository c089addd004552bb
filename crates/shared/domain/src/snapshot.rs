use crate::registrant::Registrant;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Administrator decision that replaces the automatic registration window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WindowOverride {
    /// Registration is open regardless of the clock.
    Open,
    /// Registration is closed regardless of the clock.
    Closed,
}

/// Immutable copy of the roster: registrants in registration order plus the window override.
///
/// This is what the registry publishes on every change and what the allocator is run on.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterSnapshot {
    pub registrants: Vec<Registrant>,
    pub window_override: Option<WindowOverride>,
}

impl RosterSnapshot {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.registrants.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.registrants.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Registrant> {
        self.registrants.iter().find(|r| r.id == id)
    }
}
