//! # CLI Argument Definitions
//!
//! Enum options accept the kebab-case names (`semi-willing`, `very-familiar`) as well as the
//! Chinese labels of the sign-up form (`半指挥`, `非常熟悉`). Unknown values are rejected here,
//! unlike stored records, which fall back to the form defaults.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use rally_domain::{Leadership, Proficiency, Region, Role};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "rally")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Sign-ups and team allocation for scheduled group runs")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to `rally.*` in the working directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Roster snapshot file, overriding `storage.roster` from the configuration.
    #[arg(short, long, global = true)]
    pub roster: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign up, or update an existing sign-up with the same id
    Register(RegisterArgs),
    /// Delete a sign-up
    Remove {
        /// In-game id of the registrant
        id: String,
    },
    /// Delete every sign-up (the window override is kept)
    Clear {},
    /// Show sign-ups in registration order
    List {
        /// Only show this time slot
        #[arg(short, long)]
        slot: Option<String>,
    },
    /// Headcounts per time slot and attribute
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or override the registration window
    Window {
        #[command(subcommand)]
        action: WindowAction,
    },
    /// Split every time slot into teams and a standby group
    Assign {
        /// Print the allocation as JSON
        #[arg(long)]
        json: bool,

        /// Seed the shuffles for a reproducible allocation
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// In-game id; surrounding whitespace is ignored
    #[arg(long)]
    pub id: String,

    #[arg(long, default_value_t = Role::Melee, value_parser = Role::from_str)]
    pub role: Role,

    #[arg(long, default_value_t = Leadership::Unwilling, value_parser = Leadership::from_str)]
    pub leadership: Leadership,

    #[arg(long, default_value_t = Proficiency::Familiar, value_parser = Proficiency::from_str)]
    pub proficiency: Proficiency,

    #[arg(long, default_value_t = Region::NorthAmerica, value_parser = Region::from_str)]
    pub region: Region,

    /// Time slot label (defaults to the first configured slot)
    #[arg(long)]
    pub slot: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum WindowAction {
    /// Show whether registration is open
    Status {
        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Force registration open
    Open {},
    /// Force registration closed
    Closed {},
    /// Return to the weekly schedule
    Auto {},
}
