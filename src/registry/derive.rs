//! Derived capabilities: keys shared by several prerequisites.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::sync::Arc;

use tracing::warn;

use super::{Capability, Keyed};
use crate::types::CapabilityKind;

/// Keys present in every set. An empty list of sets yields no keys.
pub fn intersect_keys<K: Ord + Clone>(sets: &[BTreeSet<K>]) -> BTreeSet<K> {
    let Some((first, rest)) = sets.split_first() else {
        return BTreeSet::new();
    };
    first
        .iter()
        .filter(|key| rest.iter().all(|set| set.contains(*key)))
        .cloned()
        .collect()
}

/// Key set of an optional keyed collection.
pub(crate) fn key_set<K: Ord + Clone, M: ?Sized>(
    models: Option<&Keyed<K, M>>,
) -> Option<BTreeSet<K>> {
    models.map(|map| map.keys().cloned().collect())
}

/// Build `derived` from the intersection of its prerequisites' keys.
///
/// The result is absent when any prerequisite is absent. Keys a
/// prerequisite has but the intersection drops are logged, as are keys
/// `build` cannot assemble.
pub(crate) fn derive<K, M, F>(
    derived: CapabilityKind,
    prerequisites: &[(CapabilityKind, Option<BTreeSet<K>>)],
    mut build: F,
) -> Capability<Keyed<K, M>>
where
    K: Ord + Clone + Display,
    M: ?Sized,
    F: FnMut(&K) -> Option<Arc<M>>,
{
    let mut sets = Vec::with_capacity(prerequisites.len());
    for (kind, keys) in prerequisites {
        match keys {
            Some(keys) => sets.push(keys.clone()),
            None => {
                if prerequisites.iter().any(|(_, k)| k.is_some()) {
                    warn!(
                        capability = %derived,
                        missing = %kind,
                        "derived capability absent: prerequisite not configured"
                    );
                }
                return Capability::Absent;
            }
        }
    }

    let shared = intersect_keys(&sets);
    for ((kind, _), keys) in prerequisites.iter().zip(&sets) {
        for key in keys.difference(&shared) {
            warn!(
                capability = %derived,
                prerequisite = %kind,
                key = %key,
                "key dropped: not available in every prerequisite"
            );
        }
    }

    let mut map: BTreeMap<K, Arc<M>> = BTreeMap::new();
    for key in shared {
        match build(&key) {
            Some(model) => {
                map.insert(key, model);
            }
            None => {
                warn!(capability = %derived, key = %key, "key dropped: prerequisite model missing")
            }
        }
    }
    Capability::Present(map)
}
