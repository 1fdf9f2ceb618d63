//! Table rendering for lookup results.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use devcap_core::{
    CapabilityResult, Device, Feature, NormalizedBand, Provider, SoftwareVersion, SupportStatus,
};
use serde::Serialize;

use crate::device::{ComboReport, DeviceReport};

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::DynamicFullWidth);
    table.set_header(header.to_vec());
    table
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn software_summary(software: &[SoftwareVersion]) -> String {
    software
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn devices_table(devices: &[Device]) -> Table {
    let mut table = new_table(["Id", "Vendor", "Model", "Name", "Released"]);
    for device in devices {
        table.add_row(vec![
            device.id.as_str(),
            device.vendor.as_str(),
            device.model_num.as_str(),
            or_dash(device.market_name.as_deref()),
            device.release_date.as_str(),
        ]);
    }
    table
}

pub fn capability_table(results: &[CapabilityResult]) -> Table {
    let mut table = new_table(["Device", "Released", "Software", "Provider", "Support"]);
    for result in results {
        let provider = result
            .provider
            .as_ref()
            .map(|p| format!("{} ({})", p.name, p.country))
            .unwrap_or_else(|| "-".to_string());
        let support = match result.support_status {
            SupportStatus::Global => result.support_status.to_string().green().to_string(),
            SupportStatus::ProviderSpecific => {
                result.support_status.to_string().yellow().to_string()
            }
        };
        table.add_row(vec![
            result.device.display_name(),
            result.device.release_date.clone(),
            software_summary(&result.software),
            provider,
            support,
        ]);
    }
    table
}

pub fn bands_table(bands: &[NormalizedBand]) -> Table {
    let mut table = new_table(["Id", "Band", "Technology", "DL class", "UL class"]);
    for band in bands {
        table.add_row(vec![
            band.id.as_str(),
            band.band_number.as_str(),
            band.technology.as_str(),
            or_dash(Some(band.dl_band_class.as_str())),
            or_dash(Some(band.ul_band_class.as_str())),
        ]);
    }
    table
}

pub fn combos_table(combos: &[ComboReport]) -> Table {
    let mut table = new_table(["Id", "Name", "Technology", "Bands"]);
    for combo in combos {
        let bands = combo
            .bands
            .iter()
            .map(NormalizedBand::label)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            combo.id.clone(),
            combo.name.clone(),
            combo.technology.clone(),
            bands,
        ]);
    }
    table
}

pub fn features_table(features: &[Feature]) -> Table {
    let mut table = new_table(["Id", "Name", "Description"]);
    for feature in features {
        table.add_row(vec![
            feature.id.as_str(),
            feature.name.as_str(),
            or_dash(feature.description.as_deref()),
        ]);
    }
    table
}

pub fn providers_table(providers: &[Provider]) -> Table {
    let mut table = new_table(["Id", "Name", "Country", "Network"]);
    for provider in providers {
        table.add_row(vec![
            provider.id.as_str(),
            provider.name.as_str(),
            provider.country.as_str(),
            or_dash(provider.network_type.as_deref()),
        ]);
    }
    table
}

fn software_table(software: &[SoftwareVersion]) -> Table {
    let mut table = new_table(["Name", "Platform", "Build", "Released"]);
    for version in software {
        table.add_row(vec![
            version.name.as_str(),
            version.platform.as_str(),
            or_dash(version.build_number.as_deref()),
            or_dash(version.release_date.as_deref()),
        ]);
    }
    table
}

pub fn print_device_report(report: &DeviceReport) {
    println!(
        "{} {}",
        report.device.display_name().bold(),
        format!("released {}", report.device.release_date).dimmed()
    );

    print_section("Software", report.software.len(), || {
        software_table(&report.software)
    });
    print_section("Bands", report.bands.len(), || bands_table(&report.bands));
    print_section("Combos", report.combos.len(), || combos_table(&report.combos));
    print_section("Features", report.features.len(), || {
        features_table(&report.features)
    });
}

fn print_section(title: &str, count: usize, table: impl FnOnce() -> Table) {
    println!("\n{} {}", title.cyan().bold(), format!("({count})").dimmed());
    if count == 0 {
        println!("  none");
    } else {
        println!("{}", table());
    }
}

/// Print `items` as pretty JSON or as the table built by `table`.
pub fn print_list<T: Serialize>(
    items: &[T],
    json: bool,
    empty_message: &str,
    table: impl FnOnce(&[T]) -> Table,
) -> anyhow::Result<()> {
    if json {
        return crate::print_json(&items);
    }
    if items.is_empty() {
        println!("{}", empty_message.yellow());
    } else {
        println!("{}", table(items));
    }
    Ok(())
}
