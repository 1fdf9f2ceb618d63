//! GraphQL documents for the supporting lookups consumed as-is.
//!
//! Capability-to-device documents are built by
//! [`devcap_core::CapabilityQuery::document`].

/// A fixed backend lookup and the response field holding its payload.
#[derive(Debug)]
pub struct Lookup {
    pub name: &'static str,
    pub field: &'static str,
    pub document: &'static str,
}

/// Vendor and model matches are separate fragments, so one device can
/// appear in both.
pub const SEARCH_DEVICES: Lookup = Lookup {
    name: "SearchDevices",
    field: "byVendor",
    document: r#"query SearchDevices($text: String!) {
  byVendor: devices(filter: { vendorContains: $text }) { ...DeviceFields }
  byModel: devices(filter: { modelNumContains: $text }) { ...DeviceFields }
}

fragment DeviceFields on Device { id vendor modelNum marketName releaseDate }
"#,
};

/// Second field of [`SEARCH_DEVICES`].
pub const SEARCH_DEVICES_MODEL_FIELD: &str = "byModel";

pub const DEVICE_DETAIL: Lookup = Lookup {
    name: "DeviceDetail",
    field: "device",
    document: r#"query DeviceDetail($id: ID!) {
  device(id: $id) {
    id vendor modelNum marketName releaseDate
    software { id name platform buildNumber releaseDate }
    bands { ...BandFields }
    combos { id name technology bands { ...BandFields } }
    features { id name description }
  }
}

fragment BandFields on Band { id bandNumber technology dlBandClass ulBandClass }
"#,
};

pub const SEARCH_BANDS: Lookup = Lookup {
    name: "SearchBands",
    field: "bands",
    document: r#"query SearchBands($text: String!) {
  bands(search: $text) { id bandNumber technology dlBandClass ulBandClass }
}
"#,
};

pub const SEARCH_COMBOS: Lookup = Lookup {
    name: "SearchCombos",
    field: "combos",
    document: r#"query SearchCombos($text: String!) {
  combos(search: $text) {
    id name technology
    bands { id bandNumber technology dlBandClass ulBandClass }
  }
}
"#,
};

pub const SEARCH_FEATURES: Lookup = Lookup {
    name: "SearchFeatures",
    field: "features",
    document: r#"query SearchFeatures($text: String!) {
  features(search: $text) { id name description }
}
"#,
};

pub const PROVIDERS: Lookup = Lookup {
    name: "Providers",
    field: "providers",
    document: r#"query Providers {
  providers { id name country networkType }
}
"#,
};
