use anyhow::Result;
use devcap_core::{
    dedupe_by_id, Band, CapabilityQuery, CapabilityResult, CapabilityRow, Combo, Device,
    DeviceDetail, Feature, Provider,
};

/// The backend query API. Implementations only fetch rows; reshaping
/// happens in `devcap-core`.
pub trait CapabilityBackend {
    /// Devices whose vendor or model number contains `text`, without
    /// duplicates.
    fn search_devices(&self, text: &str) -> Result<Vec<Device>>;

    fn device_detail(&self, device_id: &str) -> Result<Option<DeviceDetail>>;

    /// Raw rows for the operation selected by `query`.
    fn capability_rows(&self, query: &CapabilityQuery) -> Result<Vec<CapabilityRow>>;

    fn search_bands(&self, text: &str) -> Result<Vec<Band>>;

    fn search_combos(&self, text: &str) -> Result<Vec<Combo>>;

    fn search_features(&self, text: &str) -> Result<Vec<Feature>>;

    fn providers(&self) -> Result<Vec<Provider>>;

    /// Run `query` and tag each row with its support status. Backend errors
    /// are returned untouched.
    fn lookup_capability(&self, query: &CapabilityQuery) -> Result<Vec<CapabilityResult>> {
        let rows = self.capability_rows(query)?;
        Ok(query.classify(rows))
    }
}

/// Merge the vendor and model fragments of a device search.
pub fn merge_device_matches(by_vendor: Vec<Device>, by_model: Vec<Device>) -> Vec<Device> {
    dedupe_by_id(by_vendor.into_iter().chain(by_model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{device, FakeBackend};
    use devcap_core::{CapabilityKind, SupportStatus};

    #[test]
    fn test_merge_device_matches_dedupes() {
        let merged = merge_device_matches(
            vec![device("d1"), device("d2")],
            vec![device("d2"), device("d3")],
        );
        let ids: Vec<_> = merged.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn test_lookup_capability_tags_rows() {
        let backend = FakeBackend::with_capability_devices(&["d1", "d2"]);
        let scoped = CapabilityQuery::new(CapabilityKind::Band, "b2", Some("tmo".into()));

        let results = backend.lookup_capability(&scoped).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| r.support_status == SupportStatus::ProviderSpecific));
    }

    #[test]
    fn test_lookup_capability_passes_errors_through() {
        let backend = FakeBackend::failing("upstream timed out");
        let query = CapabilityQuery::new(CapabilityKind::Feature, "volte", None);

        let err = backend.lookup_capability(&query).unwrap_err();
        assert_eq!(err.to_string(), "feature:volte failed");
        assert_eq!(err.root_cause().to_string(), "upstream timed out");
    }
}
