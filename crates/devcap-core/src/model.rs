//! Backend entities as received from the capability query API.
//!
//! Everything here is a read-only snapshot. Derived collections are built by
//! the normalizer and selector modules and never written back.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub vendor: String,
    pub model_num: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
    pub release_date: String,
}

impl Device {
    /// Name shown to users: the market name when the backend has one.
    pub fn display_name(&self) -> String {
        match self.market_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{} {} ({})", self.vendor, name, self.model_num),
            None => format!("{} {}", self.vendor, self.model_num),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareVersion {
    pub id: String,
    pub name: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Raw band record. Every field except the id may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub band_number: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub dl_band_class: Option<String>,
    #[serde(default)]
    pub ul_band_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: String,
    pub name: String,
    pub technology: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bands: Vec<Band>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
}

/// A device with its software versions and everything it supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    #[serde(flatten)]
    pub device: Device,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub software: Vec<SoftwareVersion>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bands: Vec<Band>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub combos: Vec<Combo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
}

/// GraphQL reports an empty nullable list as `null`; read it as no entries.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
