//! Kernel utilities shared across slices and applications.
//! Keep this crate lightweight; it re-exports the domain and owns configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use rally_kernel::config::load_rally_config;
//!
//! let cfg = load_rally_config(None::<&str>).unwrap_or_default();
//! assert_eq!(cfg.roster.team_size, 10);
//! ```
pub mod config;

pub use rally_domain as domain;
