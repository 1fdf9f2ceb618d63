//! Collapse raw band records into one canonical row per logical band.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::Band;

/// Placeholder for a class field with no data.
pub const NO_CLASS: &str = "-";

/// Separator between merged bandwidth-class values.
pub const CLASS_SEPARATOR: &str = "/";

/// One row per `(band_number, technology)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBand {
    pub id: String,
    pub band_number: String,
    pub technology: String,
    pub dl_band_class: String,
    pub ul_band_class: String,
}

impl NormalizedBand {
    /// Short label such as `LTE B2` used in listings.
    pub fn label(&self) -> String {
        format!("{} B{}", self.technology, self.band_number)
    }
}

impl From<NormalizedBand> for Band {
    fn from(band: NormalizedBand) -> Self {
        Band {
            id: Some(band.id),
            band_number: Some(band.band_number),
            technology: Some(band.technology),
            dl_band_class: Some(band.dl_band_class),
            ul_band_class: Some(band.ul_band_class),
        }
    }
}

#[derive(Default)]
struct BandGroup {
    id: Option<String>,
    band_number: String,
    technology: String,
    dl: BTreeSet<String>,
    ul: BTreeSet<String>,
}

impl BandGroup {
    fn absorb(&mut self, band: &Band) {
        if self.id.is_none() {
            self.id = band.id.clone();
        }
        insert_class(&mut self.dl, band.dl_band_class.as_deref());
        insert_class(&mut self.ul, band.ul_band_class.as_deref());
    }

    fn finish(self) -> NormalizedBand {
        let id = self
            .id
            .unwrap_or_else(|| format!("{}-{}", self.band_number, self.technology));
        NormalizedBand {
            id,
            band_number: self.band_number,
            technology: self.technology,
            dl_band_class: join_classes(&self.dl),
            ul_band_class: join_classes(&self.ul),
        }
    }
}

/// A class value counts only when it carries data. The placeholder is
/// skipped so already-normalized rows round-trip unchanged.
fn insert_class(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty() && *v != NO_CLASS) {
        set.insert(value.to_string());
    }
}

fn join_classes(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        return NO_CLASS.to_string();
    }
    set.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(CLASS_SEPARATOR)
}

/// Group raw bands by exact `(band_number, technology)` and merge their
/// downlink and uplink class annotations.
///
/// Records missing either key are dropped. Groups come out in the order they
/// were first seen. The id is the first id seen in the group, falling back to
/// `"{band_number}-{technology}"`.
pub fn group_bands(raw: &[Band]) -> Vec<NormalizedBand> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<BandGroup> = Vec::new();

    for band in raw {
        let (Some(number), Some(technology)) =
            (band.band_number.as_deref(), band.technology.as_deref())
        else {
            continue;
        };

        let slot = *index.entry((number, technology)).or_insert_with(|| {
            groups.push(BandGroup {
                band_number: number.to_string(),
                technology: technology.to_string(),
                ..Default::default()
            });
            groups.len() - 1
        });
        groups[slot].absorb(band);
    }

    log::debug!(
        "Grouped {} raw bands into {} logical bands",
        raw.len(),
        groups.len()
    );

    groups.into_iter().map(BandGroup::finish).collect()
}
