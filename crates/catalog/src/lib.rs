//! # metro-catalog
//!
//! Catalog of transit map packages.
//!
//! A [`Catalog`] indexes [`CatalogMap`] descriptors by system name. Descriptors
//! are extracted from parsed [`metro_transit::Model`]s, or synthesized as
//! corrupted placeholders when a map file cannot be parsed.
//!
//! ## Example
//!
//! ```
//! use metro_catalog::{Catalog, CatalogConfig, MapFile};
//! use metro_catalog::transit::Model;
//!
//! let config = CatalogConfig::default();
//! let mut catalog = Catalog::from_parts(0, "https://maps.example", Vec::new());
//!
//! let file = MapFile::new("maps/paris.pmz", 4096);
//! let parsed: Result<&Model, &str> = Err("truncated file");
//! catalog.merge_descriptor(&file, "paris.pmz", parsed, &config);
//!
//! let entry = catalog.lookup("paris.pmz.ametro").unwrap();
//! assert!(entry.is_corrupted);
//! assert_eq!(entry.city_name("en"), Some("paris"));
//! ```

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod identifiers;
pub mod map;

// Re-export transit from the transit crate
pub use metro_transit as transit;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use descriptor::{build_bad_map_descriptor, describe_map, extract_map_descriptor, MapFile};
pub use error::{CatalogError, Result};
pub use identifiers::SystemName;
pub use map::{CatalogMap, LocaleEntry};
