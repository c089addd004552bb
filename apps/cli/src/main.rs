#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{assign, roster, window};
use crate::models::args::{Cli, Command};
use crate::services::context::AppContext;

use anyhow::{Context, Result};
use clap::Parser;
use rally_kernel::config::load_rally_config;
use rally_logger::Logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_rally_config(cli.config.as_deref()).context("Configuration is malformed")?;
    let _log = Logger::from_config(env!("CARGO_BIN_NAME"), &config.logging, cli.verbose)?;
    let ctx = AppContext::new(config, cli.roster);

    match cli.command {
        Command::Register(args) => roster::register_one(&ctx, args).await?,
        Command::Remove { id } => roster::remove(&ctx, &id).await?,
        Command::Clear {} => roster::clear(&ctx).await?,
        Command::List { slot } => roster::list(&ctx, slot.as_deref()).await?,
        Command::Stats { json } => roster::stats(&ctx, json).await?,
        Command::Window { action } => window::handle(&ctx, action).await?,
        Command::Assign { json, seed } => assign::assign(&ctx, json, seed).await?,
    }

    Ok(())
}
