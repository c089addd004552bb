use crate::error::RegistryError;
use crate::store::{RegistrantStore, Upserted};
use crate::window::RegistrationStatus;
use rally_domain::config::RosterRules;
use rally_domain::{Leadership, Proficiency, Region, Registrant, Role, TimeSlot};
use serde::Deserialize;

/// Raw sign-up input, before validation.
///
/// Every choice defaults to the sign-up form's preselected value; a missing time slot means the
/// first configured one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub id: String,
    pub role: Role,
    pub leadership: Leadership,
    pub proficiency: Proficiency,
    pub region: Region,
    pub time_slot: Option<String>,
}

impl RegistrationForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Turns the form into a [`Registrant`].
    ///
    /// # Errors
    /// * [`RegistryError::RegistrationClosed`] when `status` is closed.
    /// * [`RegistryError::EmptyId`] when the id is blank after trimming.
    /// * [`RegistryError::UnknownTimeSlot`] when the slot is not one of `rules.time_slots`.
    pub fn validate(
        self,
        rules: &RosterRules,
        status: RegistrationStatus,
    ) -> Result<Registrant, RegistryError> {
        if !status.open {
            return Err(RegistryError::RegistrationClosed {
                context: Some(format!("source: {}", status.source).into()),
            });
        }

        let id = self.id.trim();
        if id.is_empty() {
            return Err(RegistryError::EmptyId { context: None });
        }

        let time_slot = match self.time_slot {
            Some(label) if rules.is_known_slot(&label) => TimeSlot::from(label),
            Some(label) => {
                return Err(RegistryError::UnknownTimeSlot { slot: label, context: None });
            },
            None => rules.time_slots.first().map(TimeSlot::new).ok_or_else(|| {
                RegistryError::UnknownTimeSlot {
                    slot: String::new(),
                    context: Some("no time slots configured".into()),
                }
            })?,
        };

        Ok(Registrant {
            id: id.to_owned(),
            role: self.role,
            leadership: self.leadership,
            proficiency: self.proficiency,
            region: self.region,
            time_slot,
        })
    }
}

/// Validates `form` and saves it into `store`, replacing any earlier sign-up with the same id.
///
/// # Errors
/// Returns the validation errors of [`RegistrationForm::validate`]; the store is left untouched.
pub fn register(
    store: &RegistrantStore,
    form: RegistrationForm,
    rules: &RosterRules,
    status: RegistrationStatus,
) -> Result<(Registrant, Upserted), RegistryError> {
    let registrant = form.validate(rules, status)?;
    let outcome = store.upsert(registrant.clone());
    Ok((registrant, outcome))
}
