//! In-memory backend for worker and session tests.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use devcap_core::{
    Band, CapabilityQuery, CapabilityRow, Combo, Device, DeviceDetail, Feature, Provider,
};

use crate::backend::{merge_device_matches, CapabilityBackend};

pub(crate) fn device(id: &str) -> Device {
    Device {
        id: id.to_string(),
        vendor: "Acme".to_string(),
        model_num: format!("AC-{id}"),
        market_name: None,
        release_date: "2024-01-15".to_string(),
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    devices: Vec<Device>,
    capability_devices: HashMap<String, Vec<String>>,
    default_capability_devices: Vec<String>,
    failure: Option<String>,
    delay: Duration,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    pub fn with_capability_devices(ids: &[&str]) -> Self {
        Self {
            default_capability_devices: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn capability(mut self, capability_id: &str, ids: &[&str]) -> Self {
        self.capability_devices.insert(
            capability_id.to_string(),
            ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn begin(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match &self.failure {
            Some(message) => {
                Err(anyhow::anyhow!("{message}")).with_context(|| format!("{call} failed"))
            }
            None => Ok(()),
        }
    }
}

impl CapabilityBackend for FakeBackend {
    fn search_devices(&self, text: &str) -> Result<Vec<Device>> {
        self.begin(format!("devices:{text}"))?;
        let needle = text.to_lowercase();
        let by_vendor = self
            .devices
            .iter()
            .filter(|d| d.vendor.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let by_model = self
            .devices
            .iter()
            .filter(|d| d.model_num.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(merge_device_matches(by_vendor, by_model))
    }

    fn device_detail(&self, device_id: &str) -> Result<Option<DeviceDetail>> {
        self.begin(format!("detail:{device_id}"))?;
        Ok(self
            .devices
            .iter()
            .find(|d| d.id == device_id)
            .map(|d| DeviceDetail {
                device: d.clone(),
                software: Vec::new(),
                bands: Vec::new(),
                combos: Vec::new(),
                features: Vec::new(),
            }))
    }

    fn capability_rows(&self, query: &CapabilityQuery) -> Result<Vec<CapabilityRow>> {
        self.begin(format!("{}:{}", query.kind(), query.capability_id()))?;
        let ids = self
            .capability_devices
            .get(query.capability_id())
            .unwrap_or(&self.default_capability_devices);
        Ok(ids
            .iter()
            .map(|id| CapabilityRow {
                device: device(id),
                software: Vec::new(),
                provider: None,
                support_status: None,
            })
            .collect())
    }

    fn search_bands(&self, text: &str) -> Result<Vec<Band>> {
        self.begin(format!("bands:{text}"))?;
        Ok(Vec::new())
    }

    fn search_combos(&self, text: &str) -> Result<Vec<Combo>> {
        self.begin(format!("combos:{text}"))?;
        Ok(Vec::new())
    }

    fn search_features(&self, text: &str) -> Result<Vec<Feature>> {
        self.begin(format!("features:{text}"))?;
        Ok(Vec::new())
    }

    fn providers(&self) -> Result<Vec<Provider>> {
        self.begin("providers".to_string())?;
        Ok(Vec::new())
    }
}
