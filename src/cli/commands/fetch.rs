//! Fetch command implementation.

use anyhow::{Context, Result};
use breadth_config::AppConfig;
use breadth_data::write_table;
use tracing::info;

use super::pipeline::acquire;
use crate::cli::FetchArgs;

pub async fn run(args: FetchArgs, mut config: AppConfig) -> Result<()> {
    args.data.apply(&mut config);
    config.validate()?;

    let outcome = acquire(&config, args.data.refresh).await?;
    write_table(&outcome.table, &args.out)
        .with_context(|| format!("Failed to write {:?}", args.out))?;

    info!("Price panel saved to {:?}", args.out);
    println!(
        "Wrote {} symbols x {} rows to {} ({} from cache)",
        outcome.table.width(),
        outcome.table.len(),
        args.out.display(),
        outcome.cached
    );
    for (symbol, reason) in &outcome.failed {
        println!("  skipped {}: {}", symbol, reason);
    }

    Ok(())
}
