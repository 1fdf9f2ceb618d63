//! Capability-to-device query selection and result classification.
//!
//! Each capability kind has a global operation and a provider-scoped sibling.
//! Which one runs depends only on whether a provider id was supplied, and the
//! same fact decides the support status attached to every returned row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CapabilityError, Result};
use crate::model::{Device, Provider, SoftwareVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Band,
    Combo,
    Feature,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 3] = [
        CapabilityKind::Band,
        CapabilityKind::Combo,
        CapabilityKind::Feature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Band => "band",
            CapabilityKind::Combo => "combo",
            CapabilityKind::Feature => "feature",
        }
    }

    fn operations(&self) -> &'static KindOperations {
        match self {
            CapabilityKind::Band => &BAND_OPERATIONS,
            CapabilityKind::Combo => &COMBO_OPERATIONS,
            CapabilityKind::Feature => &FEATURE_OPERATIONS,
        }
    }

    /// Field of the response payload that holds the result rows.
    pub fn result_field(&self) -> &'static str {
        self.operations().result_field
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityKind {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "band" => Ok(CapabilityKind::Band),
            "combo" => Ok(CapabilityKind::Combo),
            "feature" => Ok(CapabilityKind::Feature),
            _ => Err(CapabilityError::UnsupportedCapabilityKind(s.to_string())),
        }
    }
}

/// A named backend operation.
#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    /// GraphQL operation name, e.g. `DevicesByBand`.
    pub name: &'static str,
    /// Root field queried on the backend, e.g. `devicesByBand`.
    pub field: &'static str,
}

#[derive(Debug)]
struct KindOperations {
    global: Operation,
    scoped: Operation,
    id_variable: &'static str,
    result_field: &'static str,
}

static BAND_OPERATIONS: KindOperations = KindOperations {
    global: Operation {
        name: "DevicesByBand",
        field: "devicesByBand",
    },
    scoped: Operation {
        name: "DevicesByBandForProvider",
        field: "devicesByBandForProvider",
    },
    id_variable: "bandId",
    result_field: "devicesByBand",
};

static COMBO_OPERATIONS: KindOperations = KindOperations {
    global: Operation {
        name: "DevicesByCombo",
        field: "devicesByCombo",
    },
    scoped: Operation {
        name: "DevicesByComboForProvider",
        field: "devicesByComboForProvider",
    },
    id_variable: "comboId",
    result_field: "devicesByCombo",
};

static FEATURE_OPERATIONS: KindOperations = KindOperations {
    global: Operation {
        name: "DevicesByFeature",
        field: "devicesByFeature",
    },
    scoped: Operation {
        name: "DevicesByFeatureForProvider",
        field: "devicesByFeatureForProvider",
    },
    id_variable: "featureId",
    result_field: "devicesByFeature",
};

/// Selection set requested for every capability row.
const ROW_SELECTION: &str = "\
    device { id vendor modelNum marketName releaseDate }
    software { id name platform buildNumber releaseDate }
    provider { id name country networkType }
    supportStatus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportStatus {
    Global,
    ProviderSpecific,
}

impl SupportStatus {
    /// Parse a status reported by the backend. Unknown spellings yield `None`.
    pub fn from_reported(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "GLOBAL" => Some(SupportStatus::Global),
            "PROVIDER_SPECIFIC" | "PROVIDER" => Some(SupportStatus::ProviderSpecific),
            _ => None,
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportStatus::Global => f.write_str("global"),
            SupportStatus::ProviderSpecific => f.write_str("provider-specific"),
        }
    }
}

/// Row shape returned by every `devicesBy*` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRow {
    pub device: Device,
    #[serde(default, deserialize_with = "crate::model::null_as_empty")]
    pub software: Vec<SoftwareVersion>,
    #[serde(default)]
    pub provider: Option<Provider>,
    /// Informational only; see [`CapabilityQuery::classify`].
    #[serde(default)]
    pub support_status: Option<String>,
}

/// A device row tagged with how it supports the queried capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityResult {
    pub device: Device,
    pub software: Vec<SoftwareVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    pub support_status: SupportStatus,
}

/// A fully shaped capability lookup: which operation to run, with which
/// variables, and where its rows live in the response.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityQuery {
    kind: CapabilityKind,
    capability_id: String,
    provider_id: Option<String>,
    technology: Option<String>,
}

impl CapabilityQuery {
    pub fn new(
        kind: CapabilityKind,
        capability_id: impl Into<String>,
        provider_id: Option<String>,
    ) -> Self {
        Self {
            kind,
            capability_id: capability_id.into(),
            provider_id,
            technology: None,
        }
    }

    /// Restrict results to one RF technology. Passed through unchanged.
    pub fn with_technology(mut self, technology: Option<String>) -> Self {
        self.technology = technology;
        self
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn capability_id(&self) -> &str {
        &self.capability_id
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn is_provider_scoped(&self) -> bool {
        self.provider_id.is_some()
    }

    pub fn operation(&self) -> &'static Operation {
        let ops = self.kind.operations();
        if self.is_provider_scoped() {
            &ops.scoped
        } else {
            &ops.global
        }
    }

    pub fn result_field(&self) -> &'static str {
        self.kind.result_field()
    }

    pub fn support_status(&self) -> SupportStatus {
        if self.is_provider_scoped() {
            SupportStatus::ProviderSpecific
        } else {
            SupportStatus::Global
        }
    }

    pub fn variables(&self) -> Value {
        let ops = self.kind.operations();
        let mut vars = Map::new();
        vars.insert(
            ops.id_variable.to_string(),
            Value::String(self.capability_id.clone()),
        );
        if let Some(provider) = &self.provider_id {
            vars.insert("providerId".to_string(), Value::String(provider.clone()));
        }
        if let Some(technology) = &self.technology {
            vars.insert("technology".to_string(), Value::String(technology.clone()));
        }
        Value::Object(vars)
    }

    /// GraphQL document for the selected operation. The root field is
    /// aliased to [`result_field`](Self::result_field) so both variants
    /// answer under the same key.
    pub fn document(&self) -> String {
        let ops = self.kind.operations();
        let op = self.operation();
        let id = ops.id_variable;

        let (provider_decl, provider_arg) = if self.is_provider_scoped() {
            (", $providerId: ID!", ", providerId: $providerId")
        } else {
            ("", "")
        };

        format!(
            "query {name}(${id}: ID!{provider_decl}, $technology: String) {{\n  \
             {alias}: {field}({id}: ${id}{provider_arg}, technology: $technology) {{\n    \
             {rows}\n  }}\n}}\n",
            name = op.name,
            rows = ROW_SELECTION,
            alias = ops.result_field,
            field = op.field,
        )
    }

    /// Tag every row with this query's support status.
    ///
    /// The tag follows from whether the query was provider-scoped. A status
    /// reported by the backend is never used, only logged when it disagrees.
    pub fn classify(&self, rows: Vec<CapabilityRow>) -> Vec<CapabilityResult> {
        let status = self.support_status();
        rows.into_iter()
            .map(|row| {
                if let Some(reported) = row.support_status.as_deref() {
                    if SupportStatus::from_reported(reported) != Some(status) {
                        log::warn!(
                            "Backend reported support status '{}' for device {} but {} query implies {}",
                            reported,
                            row.device.id,
                            self.operation().field,
                            status
                        );
                    }
                }
                CapabilityResult {
                    device: row.device,
                    software: row.software,
                    provider: row.provider,
                    support_status: status,
                }
            })
            .collect()
    }
}

/// Pick the query for `kind` (`"band"`, `"combo"` or `"feature"`).
///
/// A provider id selects the provider-scoped operation; its absence selects
/// the global one. Unknown kinds are a contract error.
pub fn select_capability_query(
    kind: &str,
    capability_id: &str,
    provider_id: Option<&str>,
) -> Result<CapabilityQuery> {
    let kind: CapabilityKind = kind.parse()?;
    Ok(CapabilityQuery::new(
        kind,
        capability_id,
        provider_id.map(str::to_string),
    ))
}
