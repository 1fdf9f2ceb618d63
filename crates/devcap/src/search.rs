use anyhow::Result;
use clap::Args;

use devcap_api::CapabilityBackend;
use devcap_core::{group_bands, CapabilityKind};

use crate::device::ComboReport;
use crate::render;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// What to search: band, combo or feature
    pub kind: String,

    /// Search text
    pub text: String,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let kind: CapabilityKind = args.kind.parse()?;
    let (_, client) = crate::connect()?;

    let spinner = crate::spinner(format!("Searching {kind}s..."));
    let empty = format!("No {kind}s match '{}'", args.text);
    match kind {
        CapabilityKind::Band => {
            let bands = client.search_bands(&args.text);
            spinner.finish_and_clear();
            let bands = group_bands(&bands?);
            render::print_list(&bands, args.json, &empty, render::bands_table)
        }
        CapabilityKind::Combo => {
            let combos = client.search_combos(&args.text);
            spinner.finish_and_clear();
            let combos: Vec<ComboReport> = combos?.into_iter().map(ComboReport::from).collect();
            render::print_list(&combos, args.json, &empty, render::combos_table)
        }
        CapabilityKind::Feature => {
            let features = client.search_features(&args.text);
            spinner.finish_and_clear();
            render::print_list(&features?, args.json, &empty, render::features_table)
        }
    }
}
