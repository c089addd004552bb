use crate::services::context::AppContext;
use crate::services::render;
use anyhow::Result;
use rally_domain::AllocationResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

pub async fn assign(ctx: &AppContext, json: bool, seed: Option<u64>) -> Result<()> {
    let snapshot = ctx.open_store().await?.snapshot();
    let rules = &ctx.config.roster;

    let result: AllocationResult = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            rally_roster::assign_with_rng(&snapshot.registrants, rules, &mut rng)
        },
        None => rally_roster::assign_with(&snapshot.registrants, rules),
    };
    info!(
        registrants = snapshot.len(),
        slots = result.slots.len(),
        warnings = result.warning_count(),
        "Teams assigned"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::allocation(&result));
    }
    Ok(())
}
