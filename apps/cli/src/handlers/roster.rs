use crate::models::args::RegisterArgs;
use crate::services::context::AppContext;
use crate::services::render;
use anyhow::Result;
use chrono::Utc;
use rally_registry::{RegistrationForm, Upserted, register, summarize};
use tracing::info;

pub async fn register_one(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let store = ctx.open_store().await?;
    let status = ctx.status(&store, Utc::now());

    let form = RegistrationForm {
        id: args.id,
        role: args.role,
        leadership: args.leadership,
        proficiency: args.proficiency,
        region: args.region,
        time_slot: args.slot,
    };
    let (registrant, outcome) = register(&store, form, &ctx.config.roster, status)?;
    ctx.save_store(&store).await?;

    let verb = match outcome {
        Upserted::Created => "Registered",
        Upserted::Replaced => "Updated",
    };
    info!(id = %registrant.id, time_slot = %registrant.time_slot, "Registration stored");
    println!("{verb} {}", render::registrant_line(&registrant));
    Ok(())
}

pub async fn remove(ctx: &AppContext, id: &str) -> Result<()> {
    let store = ctx.open_store().await?;

    if store.remove(id.trim()) {
        ctx.save_store(&store).await?;
        println!("Removed {}", id.trim());
    } else {
        println!("Not registered: {}", id.trim());
    }
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store().await?;

    let removed = store.clear();
    ctx.save_store(&store).await?;
    println!("Cleared {removed} registrants");
    Ok(())
}

pub async fn list(ctx: &AppContext, slot: Option<&str>) -> Result<()> {
    let snapshot = ctx.open_store().await?.snapshot();

    let selected = snapshot
        .registrants
        .iter()
        .filter(|r| slot.is_none_or(|slot| r.time_slot.as_str() == slot));
    print!("{}", render::registrants(selected));
    Ok(())
}

pub async fn stats(ctx: &AppContext, json: bool) -> Result<()> {
    let snapshot = ctx.open_store().await?.snapshot();
    let summary = summarize(&snapshot.registrants, &ctx.config.roster);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::summary(&summary));
    }
    Ok(())
}
