use fxhash::FxHashMap;
use rally_domain::{Registrant, TimeSlot};

/// Registrants sharing one time slot, in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool<'a> {
    pub time_slot: TimeSlot,
    pub members: Vec<&'a Registrant>,
}

impl<'a> Pool<'a> {
    #[must_use]
    pub const fn new(time_slot: TimeSlot) -> Self {
        Self { time_slot, members: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn push(&mut self, registrant: &'a Registrant) {
        self.members.push(registrant);
    }
}

/// Groups `registrants` into one pool per time slot.
///
/// Configured labels come first, in configured order. A label nobody configured gets an ad-hoc
/// pool after them, in first-seen order. Empty pools are dropped.
pub fn partition<'a, S>(registrants: &'a [Registrant], configured: &[S]) -> Vec<Pool<'a>>
where
    S: AsRef<str>,
{
    let mut pools: Vec<Pool<'a>> = Vec::with_capacity(configured.len());
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();

    for label in configured {
        let label = label.as_ref();
        if !index.contains_key(label) {
            index.insert(label, pools.len());
            pools.push(Pool::new(TimeSlot::new(label)));
        }
    }

    for registrant in registrants {
        let slot = &registrant.time_slot;
        let position = *index.entry(slot.as_str()).or_insert_with(|| {
            tracing::debug!(time_slot = %slot, "Unconfigured time slot, creating ad-hoc pool");
            pools.push(Pool::new(slot.clone()));
            pools.len() - 1
        });
        pools[position].push(registrant);
    }

    pools.retain(|pool| !pool.is_empty());
    pools
}
