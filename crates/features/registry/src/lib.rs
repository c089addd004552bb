//! # Registry
//!
//! Everything around the allocator that deals with who signed up:
//!
//! * [`store`]: the in-process registrant store (upsert/delete by id, snapshots).
//! * [`feed`]: a latest-value feed of store snapshots for re-running the allocator.
//! * [`window`]: the weekly registration window and its administrator override.
//! * [`registration`]: sign-up form validation.
//! * [`stats`]: headcounts per slot and per attribute.
//! * [`persist`]: snapshot file load/save.
//!
//! ```rust
//! use rally_registry::{RegistrantStore, RegistrationForm, register};
//! use rally_registry::window::RegistrationStatus;
//! use rally_domain::config::RosterRules;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), rally_registry::RegistryError> {
//! let store = RegistrantStore::new();
//! let mut feed = store.subscribe();
//!
//! register(&store, RegistrationForm::new("alice"), &RosterRules::default(), RegistrationStatus::forced_open())?;
//!
//! let snapshot = feed.changed().await.unwrap();
//! assert_eq!(snapshot.registrants[0].id, "alice");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod feed;
pub mod persist;
pub mod registration;
pub mod stats;
pub mod store;
pub mod window;

pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::feed::RosterFeed;
pub use crate::persist::{load_snapshot, save_snapshot};
pub use crate::registration::{RegistrationForm, register};
pub use crate::stats::{RosterStats, RosterSummary, SlotStats, summarize};
pub use crate::store::{RegistrantStore, Upserted};
pub use crate::window::{RegistrationStatus, StatusSource, registration_status};
