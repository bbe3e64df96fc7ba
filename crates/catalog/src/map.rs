//! Per-map catalog descriptors.

use itertools::Itertools;
use metro_transit::{Model, TransportTypes};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CatalogError, Result};
use crate::identifiers::SystemName;

/// Localized metadata of a map for one locale
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleEntry {
    pub locale: String,
    pub country: String,
    pub city: String,
    pub description: String,
    pub changelog: String,
}

impl LocaleEntry {
    pub fn new(locale: impl Into<String>, country: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            country: country.into(),
            city: city.into(),
            description: String::new(),
            changelog: String::new(),
        }
    }
}

/// Metadata descriptor for one transit map package.
///
/// Locale entries are always sorted by locale code and the codes are unique,
/// so every per-locale column has the same length and order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogMap {
    pub system_name: SystemName,
    pub file_name: String,
    /// Content timestamp of the source, milliseconds since the epoch
    pub timestamp: i64,
    pub transport_types: TransportTypes,
    pub version: u32,
    /// Size of the map file in bytes
    pub size: u64,
    pub compatibility_version: u32,
    #[serde(deserialize_with = "deserialize_locales")]
    locales: Vec<LocaleEntry>,
    /// Placeholder produced for a file that could not be parsed
    pub is_corrupted: bool,
}

impl CatalogMap {
    /// Create a descriptor, sorting `locales` by code.
    ///
    /// Fails with [`CatalogError::MalformedSource`] if two entries share a locale.
    pub fn new(
        system_name: SystemName,
        file_name: impl Into<String>,
        locales: Vec<LocaleEntry>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let locales = sort_locales(locales).map_err(|reason| CatalogError::malformed(&file_name, reason))?;
        Ok(Self::from_sorted(system_name, &file_name, locales))
    }

    /// Descriptor from entries already sorted with unique codes
    pub(crate) fn from_sorted(system_name: SystemName, file_name: &str, locales: Vec<LocaleEntry>) -> Self {
        debug_assert!(locales.windows(2).all(|pair| pair[0].locale < pair[1].locale));
        Self {
            system_name,
            file_name: file_name.to_string(),
            timestamp: 0,
            transport_types: TransportTypes::empty(),
            version: Model::VERSION,
            size: 0,
            compatibility_version: Model::COMPATIBILITY_VERSION,
            locales,
            is_corrupted: false,
        }
    }

    pub fn system_name(&self) -> &SystemName {
        &self.system_name
    }

    pub fn locale_entries(&self) -> &[LocaleEntry] {
        &self.locales
    }

    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|entry| entry.locale.as_str())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|entry| entry.country.as_str())
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|entry| entry.city.as_str())
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|entry| entry.description.as_str())
    }

    pub fn changelogs(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|entry| entry.changelog.as_str())
    }

    /// Entry for `locale`, falling back to the first locale
    pub fn localized(&self, locale: &str) -> Option<&LocaleEntry> {
        self.locales
            .binary_search_by(|entry| entry.locale.as_str().cmp(locale))
            .ok()
            .and_then(|index| self.locales.get(index))
            .or_else(|| self.locales.first())
    }

    pub fn city_name(&self, locale: &str) -> Option<&str> {
        self.localized(locale).map(|entry| entry.city.as_str())
    }

    pub fn country_name(&self, locale: &str) -> Option<&str> {
        self.localized(locale).map(|entry| entry.country.as_str())
    }
}

fn sort_locales(locales: Vec<LocaleEntry>) -> std::result::Result<Vec<LocaleEntry>, String> {
    let sorted = locales
        .into_iter()
        .sorted_by(|a, b| a.locale.cmp(&b.locale))
        .collect_vec();

    if let Some((duplicate, _)) = sorted.iter().tuple_windows().find(|(a, b)| a.locale == b.locale) {
        return Err(format!("duplicate locale {}", duplicate.locale));
    }

    Ok(sorted)
}

fn deserialize_locales<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<LocaleEntry>, D::Error> {
    let locales = Vec::<LocaleEntry>::deserialize(deserializer)?;
    sort_locales(locales).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(codes: &[&str]) -> Vec<LocaleEntry> {
        codes
            .iter()
            .map(|code| LocaleEntry::new(*code, format!("country-{code}"), format!("city-{code}")))
            .collect()
    }

    #[test]
    fn test_new_sorts_locales() {
        let map = CatalogMap::new("spb.ametro".into(), "spb.ametro", entries(&["ru", "de", "en"])).unwrap();

        assert_eq!(map.locale_codes().collect_vec(), vec!["de", "en", "ru"]);
        assert_eq!(map.cities().collect_vec(), vec!["city-de", "city-en", "city-ru"]);
        assert_eq!(map.countries().count(), 3);
        assert_eq!(map.version, Model::VERSION);
        assert!(!map.is_corrupted);
    }

    #[test]
    fn test_new_rejects_duplicate_locales() {
        let result = CatalogMap::new("spb.ametro".into(), "spb.ametro", entries(&["en", "ru", "en"]));
        match result {
            Err(CatalogError::MalformedSource { file_name, reason }) => {
                assert_eq!(file_name, "spb.ametro");
                assert_eq!(reason, "duplicate locale en");
            }
            other => panic!("expected malformed source, got {other:?}"),
        }
    }

    #[test]
    fn test_localized_falls_back_to_first() {
        let map = CatalogMap::new("spb.ametro".into(), "spb.ametro", entries(&["ru", "en"])).unwrap();

        assert_eq!(map.city_name("ru"), Some("city-ru"));
        assert_eq!(map.country_name("en"), Some("country-en"));
        assert_eq!(map.city_name("fr"), Some("city-en"));
    }

    #[test]
    fn test_deserialize_restores_sorted_locales() {
        let json = r#"{
            "system_name": "spb.ametro",
            "file_name": "spb.ametro",
            "timestamp": 5,
            "transport_types": 1,
            "version": 1,
            "size": 10,
            "compatibility_version": 1,
            "locales": [
                {"locale": "ru", "country": "Россия", "city": "Санкт-Петербург", "description": "", "changelog": ""},
                {"locale": "en", "country": "Russia", "city": "Saint Petersburg", "description": "", "changelog": ""}
            ],
            "is_corrupted": false
        }"#;

        let map: CatalogMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.locale_codes().collect_vec(), vec!["en", "ru"]);
        assert_eq!(map.size, 10);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_locales() {
        let map = CatalogMap::new("spb.ametro".into(), "spb.ametro", entries(&["en"])).unwrap();
        let mut value = serde_json::to_value(&map).unwrap();
        let entry = value["locales"][0].clone();
        value["locales"].as_array_mut().unwrap().push(entry);

        assert!(serde_json::from_value::<CatalogMap>(value).is_err());
    }
}
