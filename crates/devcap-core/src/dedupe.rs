use std::collections::HashMap;

use crate::model::{Band, Combo, Device, Feature, Provider, SoftwareVersion};

/// Records that carry an identity key.
pub trait Identified {
    /// `None` means the record has no identity and is never merged.
    fn identity(&self) -> Option<&str>;
}

macro_rules! identified_by_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn identity(&self) -> Option<&str> {
                    Some(self.id.as_str())
                }
            }
        )*
    };
}

identified_by_id!(Device, SoftwareVersion, Combo, Feature, Provider);

impl Identified for Band {
    fn identity(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl<T: Identified> Identified for &T {
    fn identity(&self) -> Option<&str> {
        (**self).identity()
    }
}

/// Keep one record per identity, at the position of its last occurrence.
///
/// Records without an identity are all kept in place.
pub fn dedupe_by_id<T: Identified>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let records: Vec<T> = records.into_iter().collect();

    let mut last_seen: HashMap<&str, usize> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(id) = record.identity() {
            last_seen.insert(id, i);
        }
    }
    let keep: Vec<bool> = records
        .iter()
        .enumerate()
        .map(|(i, record)| match record.identity() {
            Some(id) => last_seen.get(id) == Some(&i),
            None => true,
        })
        .collect();

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
