//! The catalog index engine.
//!
//! A [`Catalog`] keeps its maps in display order plus a lazily built index
//! from system name to position. The index is a plain cache without any
//! synchronization: lookups take `&mut self` because they may build it, and
//! callers sharing a catalog across threads must wrap it in a lock.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::CatalogConfig;
use crate::descriptor::{describe_map, MapFile};
use crate::error::{CatalogError, Result};
use crate::identifiers::SystemName;
use crate::map::CatalogMap;
use metro_transit::TransitModel;

/// Versioned collection of map descriptors from one origin.
///
/// Only `timestamp`, `base_url` and `maps` are persisted. The index, the
/// loading timestamp and the corruption flag are reset on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    timestamp: i64,
    base_url: Option<String>,
    maps: Vec<CatalogMap>,

    #[serde(skip)]
    is_corrupted: bool,
    /// Name to position in `maps`; `None` until first needed
    #[serde(skip)]
    index: Option<HashMap<SystemName, usize>>,
    #[serde(skip)]
    loading_timestamp: Option<i64>,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(timestamp: i64, base_url: impl Into<String>, maps: Vec<CatalogMap>) -> Self {
        Self {
            timestamp,
            base_url: Some(base_url.into()),
            maps,
            ..Self::default()
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = Some(base_url.into());
    }

    /// Entries in display order
    pub fn maps(&self) -> &[CatalogMap] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn is_corrupted(&self) -> bool {
        self.is_corrupted
    }

    /// Mark the whole catalog. Nothing in this crate clears the flag.
    pub fn set_corrupted(&mut self, is_corrupted: bool) {
        self.is_corrupted = is_corrupted;
    }

    /// Wall-clock time of the most recent lookup, hit or miss
    pub fn loading_timestamp(&self) -> Option<i64> {
        self.loading_timestamp
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Build the name index if it is absent
    pub fn ensure_index(&mut self) {
        self.index_mut();
    }

    /// Drop the index. The next lookup or mutation rebuilds it.
    pub fn invalidate_index(&mut self) {
        self.index = None;
    }

    fn index_mut(&mut self) -> &mut HashMap<SystemName, usize> {
        self.index.get_or_insert_with(|| build_index(&mut self.maps))
    }

    /// Map with `system_name`, if present.
    ///
    /// Always records the loading timestamp, even on a miss.
    pub fn lookup(&mut self, system_name: &str) -> Option<&CatalogMap> {
        self.loading_timestamp = Some(now_millis());
        let position = self.index_mut().get(system_name).copied()?;
        self.maps.get(position)
    }

    /// Like [`Self::lookup`], but a miss is a [`CatalogError::MapNotFound`]
    pub fn require(&mut self, system_name: &str) -> Result<&CatalogMap> {
        self.lookup(system_name)
            .ok_or_else(|| CatalogError::MapNotFound(SystemName::new(system_name)))
    }

    /// Insert `map`, replacing any entry with the same system name.
    ///
    /// The replaced entry is returned. The new entry always goes last.
    pub fn append(&mut self, map: CatalogMap) -> Option<CatalogMap> {
        let replaced = self.remove_entry(map.system_name.as_str());
        if let Some(old) = &replaced {
            debug!(system_name = %old.system_name, "replacing catalog entry");
        }

        let name = map.system_name.clone();
        let position = self.maps.len();
        self.maps.push(map);
        self.index_mut().insert(name, position);
        self.touch();

        replaced
    }

    /// Remove the entry named `system_name`.
    ///
    /// A missing entry is not an error. The timestamp moves either way.
    pub fn delete(&mut self, system_name: &str) -> Option<CatalogMap> {
        let removed = self.remove_entry(system_name);
        if removed.is_none() {
            trace!(system_name, "delete of absent catalog entry");
        }
        self.touch();
        removed
    }

    /// Describe a map file and append the result.
    ///
    /// Unparsable files land in the catalog as corrupted placeholders.
    pub fn merge_descriptor<M, E>(
        &mut self,
        file: &MapFile,
        file_name: &str,
        parsed: std::result::Result<&M, E>,
        config: &CatalogConfig,
    ) -> Option<CatalogMap>
    where
        M: TransitModel + ?Sized,
        E: fmt::Display,
    {
        self.append(describe_map(file, file_name, parsed, config))
    }

    /// Shallow equality of two optional catalogs.
    ///
    /// True iff both are present and their timestamps, base URLs and entry
    /// counts match. Entries themselves are not compared.
    pub fn equals(left: Option<&Catalog>, right: Option<&Catalog>) -> bool {
        match (left, right) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Whether the index, if built, is exactly the inverse of `maps`
    pub fn is_consistent(&self) -> bool {
        match &self.index {
            None => true,
            Some(index) => {
                index.len() == self.maps.len()
                    && self
                        .maps
                        .iter()
                        .enumerate()
                        .all(|(position, map)| index.get(&map.system_name) == Some(&position))
            }
        }
    }

    fn remove_entry(&mut self, system_name: &str) -> Option<CatalogMap> {
        let index = self.index_mut();
        let position = index.remove(system_name)?;
        for shifted in index.values_mut() {
            if *shifted > position {
                *shifted -= 1;
            }
        }
        Some(self.maps.remove(position))
    }

    /// Move the timestamp to now, strictly forward when possible.
    ///
    /// A timestamp already at `i64::MAX` cannot grow, so it drops back to now.
    fn touch(&mut self) {
        let now = now_millis();
        self.timestamp = match self.timestamp.checked_add(1) {
            Some(next) => now.max(next),
            None => now,
        };
    }
}

/// Index `maps` by name.
///
/// Should `maps` hold a name more than once (a hand-edited or foreign
/// catalog), the last occurrence wins and earlier ones are dropped, the same
/// outcome as appending them in order.
fn build_index(maps: &mut Vec<CatalogMap>) -> HashMap<SystemName, usize> {
    let mut last_seen: HashMap<SystemName, usize> = HashMap::with_capacity(maps.len());
    for (position, map) in maps.iter().enumerate() {
        last_seen.insert(map.system_name.clone(), position);
    }

    if last_seen.len() != maps.len() {
        warn!(
            entries = maps.len(),
            unique = last_seen.len(),
            "catalog holds duplicate system names, keeping the last of each"
        );
        let mut position = 0;
        maps.retain(|map| {
            let keep = last_seen.get(&map.system_name) == Some(&position);
            position += 1;
            keep
        });
    }

    let index: HashMap<_, _> = maps
        .iter()
        .enumerate()
        .map(|(position, map)| (map.system_name.clone(), position))
        .collect();

    debug!(entries = index.len(), "built catalog index");
    index
}

/// Shallow: timestamp, base URL and entry count only.
///
/// A catalog without a base URL equals nothing, itself included.
impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        match (&self.base_url, &other.base_url) {
            (Some(left), Some(right)) => {
                self.timestamp == other.timestamp && left == right && self.maps.len() == other.maps.len()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[TIME:{};URL:{};COUNT:{}]",
            self.timestamp,
            self.base_url.as_deref().unwrap_or("null"),
            self.maps.len()
        )
    }
}
