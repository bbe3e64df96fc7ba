//! Building [`CatalogMap`] descriptors from map files.
//!
//! A parsed model yields a full descriptor. A file that failed to parse, or
//! whose model is inconsistent, yields a placeholder flagged as corrupted so
//! catalog maintenance never fails because of one bad file.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use metro_transit::{Model, TransitModel};
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::map::{CatalogMap, LocaleEntry};

/// Placeholder country names for unparsable maps, per locale
pub const UNKNOWN_COUNTRY: [(&str, &str); 2] = [("en", "Unknown"), ("ru", "Неизвестно")];

/// Description recorded for every locale of an extracted map
pub const DESCRIPTION_PLACEHOLDER: &str = "Not supported yet.";

/// A map file on disk, as far as the catalog cares about it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapFile {
    path: PathBuf,
    len: u64,
}

impl MapFile {
    pub fn new(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            len,
        }
    }

    /// Stat `path` for its size
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, metadata.len()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Display name guessed from a file name: everything before the first `.`.
///
/// A name without any `.` is returned whole.
pub fn suggested_map_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(index) => &file_name[..index],
        None => file_name,
    }
}

/// Placeholder descriptor for a file that could not be parsed
pub fn build_bad_map_descriptor(file: &MapFile, file_name: &str, config: &CatalogConfig) -> CatalogMap {
    let suggested = suggested_map_name(file_name);
    debug!(path = %file.path().display(), suggested, "building placeholder descriptor");

    let locales = UNKNOWN_COUNTRY
        .iter()
        .map(|(locale, country)| LocaleEntry::new(*locale, *country, suggested))
        .collect();

    let mut map = CatalogMap::from_sorted(config.system_name_for(file_name), file_name, locales);
    map.is_corrupted = true;
    map
}

/// Descriptor for a successfully parsed model.
///
/// Locale entries come out sorted by locale code. A repeated locale code
/// keeps its first occurrence. Fails with [`CatalogError::MalformedSource`]
/// if the model's text tables do not line up with its locales.
pub fn extract_map_descriptor<M>(
    file: &MapFile,
    file_name: &str,
    model: &M,
    config: &CatalogConfig,
) -> Result<CatalogMap>
where
    M: TransitModel + ?Sized,
{
    let locales = model
        .locales()
        .iter()
        .enumerate()
        .map(|(index, locale)| -> metro_transit::Result<LocaleEntry> {
            let city = model.localized_text(index, model.city_name())?;
            let country = model.localized_text(index, model.country_name())?;
            Ok(LocaleEntry {
                description: DESCRIPTION_PLACEHOLDER.to_string(),
                ..LocaleEntry::new(locale.as_str(), country, city)
            })
        })
        .collect::<metro_transit::Result<Vec<_>>>()
        .map_err(|err| CatalogError::malformed(file_name, err))?;

    let total = locales.len();
    let locales = locales
        .into_iter()
        .sorted_by(|a, b| a.locale.cmp(&b.locale))
        .dedup_by(|a, b| a.locale == b.locale)
        .collect_vec();
    if locales.len() != total {
        warn!(
            file_name,
            dropped = total - locales.len(),
            "model repeats locale codes, keeping the first of each"
        );
    }

    let mut map = CatalogMap::new(config.system_name_for(file_name), file_name, locales)?;
    map.timestamp = model.timestamp();
    map.transport_types = model.transport_types();
    map.version = Model::VERSION;
    map.size = file.len();
    map.compatibility_version = Model::COMPATIBILITY_VERSION;
    Ok(map)
}

/// Descriptor for a file whatever its parse outcome.
///
/// `parsed` is the loader's result. Parse failures and inconsistent models
/// both fall back to [`build_bad_map_descriptor`].
pub fn describe_map<M, E>(
    file: &MapFile,
    file_name: &str,
    parsed: std::result::Result<&M, E>,
    config: &CatalogConfig,
) -> CatalogMap
where
    M: TransitModel + ?Sized,
    E: Display,
{
    let error = match parsed {
        Ok(model) => match extract_map_descriptor(file, file_name, model, config) {
            Ok(map) => return map,
            Err(err) => err.to_string(),
        },
        Err(err) => CatalogError::malformed(file_name, err).to_string(),
    };

    warn!(path = %file.path().display(), %error, "map could not be described, using placeholder");
    build_bad_map_descriptor(file, file_name, config)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use metro_transit::{TextId, TransportKind};

    use super::*;

    fn texts(items: &[&str]) -> Vec<Arc<str>> {
        items.iter().map(|t| (*t).into()).collect()
    }

    fn moscow_model() -> Model {
        let mut model = Model::from_data(
            vec!["ru".into(), "en".into()],
            vec![texts(&["Москва", "Россия"]), texts(&["Moscow", "Russia"])],
            TextId::new(1),
            TextId::new(0),
        );
        model.timestamp = 1_262_304_000_000;
        model.transport_types = [TransportKind::Metro, TransportKind::Tram].into_iter().collect();
        model
    }

    #[test]
    fn test_suggested_map_name() {
        assert_eq!(suggested_map_name("paris.pmetro"), "paris");
        assert_eq!(suggested_map_name("st.petersburg.pmz"), "st");
        assert_eq!(suggested_map_name("minsk"), "minsk");
        assert_eq!(suggested_map_name(".pmz"), "");
    }

    #[test]
    fn test_bad_descriptor() {
        let file = MapFile::new("/maps/paris.pmetro", 2048);
        let map = build_bad_map_descriptor(&file, "paris.pmetro", &CatalogConfig::default());

        assert!(map.is_corrupted);
        assert_eq!(map.system_name.as_str(), "paris.pmetro");
        assert_eq!(map.locale_codes().collect_vec(), vec!["en", "ru"]);
        assert_eq!(map.countries().collect_vec(), vec!["Unknown", "Неизвестно"]);
        assert_eq!(map.cities().collect_vec(), vec!["paris", "paris"]);
        assert!(map.descriptions().all(str::is_empty));
        assert!(map.changelogs().all(str::is_empty));
        assert_eq!(map.size, 0);
        assert_eq!(map.timestamp, 0);
        assert_eq!(map.version, Model::VERSION);
    }

    #[test]
    fn test_bad_descriptor_legacy_name() {
        let file = MapFile::new("/maps/kiev.pmz", 10);
        let map = build_bad_map_descriptor(&file, "kiev.pmz", &CatalogConfig::default());
        assert_eq!(map.system_name.as_str(), "kiev.pmz.ametro");
        assert_eq!(map.file_name, "kiev.pmz");
    }

    #[test]
    fn test_extract_sorts_locales() {
        let model = moscow_model();
        let file = MapFile::new("/maps/moscow.pmz", 52_000);
        let map = extract_map_descriptor(&file, "moscow.pmz", &model, &CatalogConfig::default()).unwrap();

        assert_eq!(map.locale_codes().collect_vec(), vec!["en", "ru"]);
        assert_eq!(map.cities().collect_vec(), vec!["Moscow", "Москва"]);
        assert_eq!(map.countries().collect_vec(), vec!["Russia", "Россия"]);
        assert!(map.changelogs().all(str::is_empty));
        assert!(map.descriptions().all(|d| d == DESCRIPTION_PLACEHOLDER));
        assert!(!map.is_corrupted);

        // the model itself is left in source order
        assert_eq!(model.locales, vec!["ru".to_string(), "en".to_string()]);
    }

    #[test]
    fn test_extract_copies_metadata() {
        let model = moscow_model();
        let file = MapFile::new("/maps/moscow.pmz", 52_000);
        let map = extract_map_descriptor(&file, "moscow.pmz", &model, &CatalogConfig::default()).unwrap();

        assert_eq!(map.system_name.as_str(), "moscow.pmz.ametro");
        assert_eq!(map.file_name, "moscow.pmz");
        assert_eq!(map.timestamp, 1_262_304_000_000);
        assert!(map.transport_types.contains(TransportKind::Tram));
        assert_eq!(map.size, 52_000);
        assert_eq!(map.version, Model::VERSION);
        assert_eq!(map.compatibility_version, Model::COMPATIBILITY_VERSION);
    }

    #[test]
    fn test_extract_keeps_first_of_repeated_locale() {
        let mut model = moscow_model();
        model.locales.push("ru".into());
        model.locale_texts.push(texts(&["Moskva", "Rossiya"]));
        let file = MapFile::new("/maps/moscow.pmz", 500);

        let map = describe_map::<_, String>(&file, "moscow.pmz", Ok(&model), &CatalogConfig::default());

        assert!(!map.is_corrupted);
        assert_eq!(map.locale_codes().collect_vec(), vec!["en", "ru"]);
        assert_eq!(map.cities().collect_vec(), vec!["Moscow", "Москва"]);
        assert_eq!(map.countries().collect_vec(), vec!["Russia", "Россия"]);
        assert_eq!(map.size, 500);
        assert_eq!(map.timestamp, 1_262_304_000_000);
    }

    #[test]
    fn test_extract_rejects_missing_text_table() {
        let mut model = moscow_model();
        model.locale_texts.pop();
        let file = MapFile::new("/maps/moscow.pmz", 1);

        let result = extract_map_descriptor(&file, "moscow.pmz", &model, &CatalogConfig::default());
        assert!(matches!(result, Err(CatalogError::MalformedSource { .. })));
    }

    #[test]
    fn test_describe_map_falls_back_on_parse_error() {
        let file = MapFile::new("/maps/broken.pmz", 3);
        let parsed: std::result::Result<&Model, &str> = Err("unexpected end of file");
        let map = describe_map(&file, "broken.pmz", parsed, &CatalogConfig::default());

        assert!(map.is_corrupted);
        assert_eq!(map.city_name("en"), Some("broken"));
    }

    #[test]
    fn test_describe_map_uses_model() {
        let model = moscow_model();
        let file = MapFile::new("/maps/moscow.pmz", 7);
        let map = describe_map::<_, String>(&file, "moscow.pmz", Ok(&model), &CatalogConfig::default());

        assert!(!map.is_corrupted);
        assert_eq!(map.city_name("ru"), Some("Москва"));
    }

    #[test]
    fn test_map_file_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("riga.pmz");
        fs::write(&path, b"0123456789").unwrap();

        let file = MapFile::open(&path).unwrap();
        assert_eq!(file.len(), 10);
        assert!(MapFile::open(dir.path().join("missing.pmz")).is_err());
    }
}
