use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use inquire::list_option::ListOption;
use inquire::Select;
use serde::Serialize;

use devcap_api::{CapabilityBackend, DevcapClient, LookupResults, LookupSession};
use devcap_core::{
    group_bands, should_auto_select, Combo, Device, DeviceDetail, Feature, NormalizedBand,
    SoftwareVersion,
};

use crate::render;
use crate::tty;

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Vendor or model text to search for
    pub text: String,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Device detail with bands collapsed to one row per band and technology.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReport {
    #[serde(flatten)]
    pub device: Device,
    pub software: Vec<SoftwareVersion>,
    pub bands: Vec<NormalizedBand>,
    pub combos: Vec<ComboReport>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboReport {
    pub id: String,
    pub name: String,
    pub technology: String,
    pub bands: Vec<NormalizedBand>,
}

impl From<Combo> for ComboReport {
    fn from(combo: Combo) -> Self {
        ComboReport {
            bands: group_bands(&combo.bands),
            id: combo.id,
            name: combo.name,
            technology: combo.technology,
        }
    }
}

impl From<DeviceDetail> for DeviceReport {
    fn from(detail: DeviceDetail) -> Self {
        DeviceReport {
            bands: group_bands(&detail.bands),
            device: detail.device,
            software: detail.software,
            combos: detail.combos.into_iter().map(ComboReport::from).collect(),
            features: detail.features,
        }
    }
}

pub fn execute(args: DeviceArgs) -> Result<()> {
    let (config, client) = crate::connect()?;

    let mut session = LookupSession::new(client.clone(), config.debounce);
    session.search_devices(args.text.as_str());
    let devices = match crate::await_results(&mut session, &config, "Searching devices...")? {
        LookupResults::Devices(devices) => devices,
        LookupResults::Capability(_) => anyhow::bail!("Unexpected capability results"),
    };

    if devices.is_empty() {
        println!("{} '{}'", "No devices match".yellow(), args.text);
        return Ok(());
    }

    if should_auto_select(&devices, None) {
        return show_device(&client, &devices[0].id, args.json);
    }

    if args.json || !tty::is_interactive() {
        return render::print_list(&devices, args.json, "", render::devices_table);
    }

    let items: Vec<String> = devices.iter().map(Device::display_name).collect();
    let choice = Select::new("Select a device:", items)
        .with_page_size(15)
        .raw_prompt()?;
    let device = chosen_device(&devices, &choice).context("Selected device not found")?;

    show_device(&client, &device.id, args.json)
}

/// Resolve a picker choice by position; display names are not unique.
fn chosen_device<'a>(devices: &'a [Device], choice: &ListOption<String>) -> Option<&'a Device> {
    devices.get(choice.index)
}

/// Fetch one device and print its normalized capabilities.
pub fn show_device(client: &DevcapClient, device_id: &str, json: bool) -> Result<()> {
    let spinner = crate::spinner(format!("Loading device {device_id}..."));
    let detail = client.device_detail(device_id);
    spinner.finish_and_clear();

    let detail = detail?.with_context(|| format!("Device '{device_id}' not found"))?;
    let report = DeviceReport::from(detail);
    if json {
        crate::print_json(&report)
    } else {
        render::print_device_report(&report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcap_core::Band;

    fn band(id: &str, number: &str, dl: &str) -> Band {
        Band {
            id: Some(id.to_string()),
            band_number: Some(number.to_string()),
            technology: Some("LTE".to_string()),
            dl_band_class: Some(dl.to_string()),
            ul_band_class: Some("A".to_string()),
        }
    }

    fn device(id: &str, model_num: &str) -> Device {
        Device {
            id: id.to_string(),
            vendor: "Acme".to_string(),
            model_num: model_num.to_string(),
            market_name: Some("Rocket".to_string()),
            release_date: "2024-03-01".to_string(),
        }
    }

    #[test]
    fn test_choice_resolves_by_index_not_name() {
        let devices = vec![device("d1", "AC-1"), device("d2", "AC-1")];
        assert_eq!(devices[0].display_name(), devices[1].display_name());

        let choice = ListOption::new(1, devices[1].display_name());
        assert_eq!(chosen_device(&devices, &choice).map(|d| d.id.as_str()), Some("d2"));

        let out_of_range = ListOption::new(2, "gone".to_string());
        assert!(chosen_device(&devices, &out_of_range).is_none());
    }

    #[test]
    fn test_report_normalizes_device_and_combo_bands() {
        let detail = DeviceDetail {
            device: device("d1", "AC-1"),
            software: Vec::new(),
            bands: vec![band("b2a", "2", "A"), band("b2c", "2", "C")],
            combos: vec![Combo {
                id: "ca_2a-66a".to_string(),
                name: "CA_2A-66A".to_string(),
                technology: "LTE".to_string(),
                bands: vec![band("b2a", "2", "A"), band("b66a", "66", "A")],
            }],
            features: Vec::new(),
        };

        let report = DeviceReport::from(detail);
        insta::assert_json_snapshot!(report, @r#"
        {
          "id": "d1",
          "vendor": "Acme",
          "modelNum": "AC-1",
          "marketName": "Rocket",
          "releaseDate": "2024-03-01",
          "software": [],
          "bands": [
            {
              "id": "b2a",
              "bandNumber": "2",
              "technology": "LTE",
              "dlBandClass": "A/C",
              "ulBandClass": "A"
            }
          ],
          "combos": [
            {
              "id": "ca_2a-66a",
              "name": "CA_2A-66A",
              "technology": "LTE",
              "bands": [
                {
                  "id": "b2a",
                  "bandNumber": "2",
                  "technology": "LTE",
                  "dlBandClass": "A",
                  "ulBandClass": "A"
                },
                {
                  "id": "b66a",
                  "bandNumber": "66",
                  "technology": "LTE",
                  "dlBandClass": "A",
                  "ulBandClass": "A"
                }
              ]
            }
          ],
          "features": []
        }
        "#);
    }
}
