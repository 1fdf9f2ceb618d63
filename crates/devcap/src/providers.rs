use anyhow::Result;
use clap::Args;

use devcap_api::CapabilityBackend;
use devcap_core::dedupe_by_id;

use crate::render;

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ProvidersArgs) -> Result<()> {
    let (_, client) = crate::connect()?;

    let spinner = crate::spinner("Loading providers...");
    let providers = client.providers();
    spinner.finish_and_clear();

    let providers = dedupe_by_id(providers?);
    render::print_list(&providers, args.json, "No providers found", render::providers_table)
}
