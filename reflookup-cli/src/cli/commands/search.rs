//! `reflookup search` - one direct query through the widget's client

use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::cli::SearchArgs;
use reflookup::api::fetch_results;
use reflookup::lookup::{build_search_url, render_rows};
use reflookup::{HttpSearchClient, LookupConfig, SearchClient};

pub async fn handle_search_command(args: SearchArgs, config: &LookupConfig) -> Result<()> {
    if args.url.trim().is_empty() {
        anyhow::bail!("Search endpoint must not be empty");
    }

    let client = HttpSearchClient::new(config).context("Failed to build HTTP client")?;

    // An explicit --ref is always sent
    let mut config = config.clone();
    if args.reference.is_some() {
        config.direct_reference = true;
    }
    let url = build_search_url(
        &args.url,
        &args.query,
        args.reference.as_deref().unwrap_or_default(),
        &config,
    );
    info!("Searching {}", url);

    let items = if args.strict {
        client
            .search(&url)
            .await
            .with_context(|| format!("Lookup query failed: {}", url))?
    } else {
        fetch_results(&client, &url).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let rows = render_rows(&items);
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
        return Ok(());
    }

    for row in &rows {
        let id = if row.id.is_empty() { "-".dimmed() } else { row.id.as_str().cyan() };
        println!("{:>8}  {}", id, row.label);
    }
    println!();
    println!("{} {}", rows.len().to_string().bright_green().bold(), "rows".dimmed());
    Ok(())
}
