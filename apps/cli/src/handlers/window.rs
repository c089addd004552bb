use crate::models::args::WindowAction;
use crate::services::context::AppContext;
use crate::services::render;
use anyhow::Result;
use chrono::Utc;
use rally_domain::WindowOverride;

pub async fn handle(ctx: &AppContext, action: WindowAction) -> Result<()> {
    let store = ctx.open_store().await?;

    let window_override = match action {
        WindowAction::Status { at } => {
            let status = ctx.status(&store, at.unwrap_or_else(Utc::now));
            println!("{}", render::status(status));
            return Ok(());
        },
        WindowAction::Open {} => Some(WindowOverride::Open),
        WindowAction::Closed {} => Some(WindowOverride::Closed),
        WindowAction::Auto {} => None,
    };

    store.set_window_override(window_override);
    ctx.save_store(&store).await?;

    match window_override {
        Some(forced) => println!("Registration window forced {forced}"),
        None => println!("Registration window follows the weekly schedule"),
    }
    Ok(())
}
