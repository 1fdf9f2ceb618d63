use anyhow::Result;
use clap::Args;
use colored::Colorize;

use devcap_api::{LookupResults, LookupSession};
use devcap_core::select_capability_query;

use crate::{device, render};

#[derive(Args, Debug)]
pub struct CapabilityArgs {
    /// Capability kind: band, combo or feature
    pub kind: String,

    /// Capability id
    pub id: String,

    /// Restrict to devices supported by this provider
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Restrict to one radio technology (e.g. LTE, NR)
    #[arg(short, long)]
    pub technology: Option<String>,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: CapabilityArgs) -> Result<()> {
    // Reject unknown kinds before touching config or the network
    let query = select_capability_query(&args.kind, &args.id, args.provider.as_deref())?
        .with_technology(args.technology);

    let (config, client) = crate::connect()?;
    let mut session = LookupSession::new(client.clone(), config.debounce);
    session.lookup_capability(query.clone());
    let message = format!("Finding devices with {} {}...", query.kind(), query.capability_id());
    let results = match crate::await_results(&mut session, &config, &message)? {
        LookupResults::Capability(results) => results,
        LookupResults::Devices(_) => anyhow::bail!("Unexpected device results"),
    };

    if args.json {
        return crate::print_json(&results);
    }

    let scope = match query.provider_id() {
        Some(provider) => format!("on provider {provider}"),
        None => "globally".to_string(),
    };
    let empty = format!(
        "No devices support {} {} {scope}",
        query.kind(),
        query.capability_id()
    );
    render::print_list(&results, false, &empty, render::capability_table)?;

    if let Some(selected) = session.selected_device() {
        println!("\n{} {}", "Selected:".green().bold(), selected.display_name().bold());
        device::show_device(&client, &selected.id, false)?;
    }
    Ok(())
}
