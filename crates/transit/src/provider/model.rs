//! In-memory parsed transit map.
//!
//! [`Model`] is the arena every id in this crate points into. A map loader
//! fills it once; afterwards it is only read, so it can be shared freely
//! between segments and catalog code.

use std::collections::HashSet;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::segment::TransportSegment;

// ============================================================================
// Records
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationRecord {
    pub name: TextId,
    pub line_id: LineId,
}

impl StationRecord {
    pub fn new(name: TextId, line_id: LineId) -> Self {
        Self { name, line_id }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRecord {
    pub name: TextId,
    pub kind: Option<TransportKind>,
}

impl LineRecord {
    pub fn new(name: TextId) -> Self {
        Self { name, kind: None }
    }

    pub fn with_kind(name: TextId, kind: TransportKind) -> Self {
        Self { name, kind: Some(kind) }
    }
}

// ============================================================================
// Model
// ============================================================================

/// One parsed transit map with its shared arrays
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    // Localization
    pub locales: Vec<String>,
    pub locale_texts: Vec<Vec<Arc<str>>>,

    // Metadata
    pub country_name: TextId,
    pub city_name: TextId,
    pub timestamp: i64,
    pub transport_types: TransportTypes,

    // Structure
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
    pub segments: Vec<TransportSegment>,

    #[cfg_attr(feature = "serde", serde(skip))]
    active_locale: usize,
}

impl Model {
    /// Format version stamped into catalog descriptors
    pub const VERSION: u32 = 1;

    /// Oldest reader version able to open maps of [`Self::VERSION`]
    pub const COMPATIBILITY_VERSION: u32 = 1;

    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from its localized text tables (used by loaders)
    pub fn from_data(
        locales: Vec<String>,
        locale_texts: Vec<Vec<Arc<str>>>,
        country_name: TextId,
        city_name: TextId,
    ) -> Self {
        Self {
            locales,
            locale_texts,
            country_name,
            city_name,
            ..Self::default()
        }
    }

    pub fn active_locale(&self) -> Option<&str> {
        self.locales.get(self.active_locale).map(String::as_str)
    }

    /// Switch the text table used by [`TransitModel::texts`]
    pub fn select_locale(&mut self, locale: &str) -> Result<()> {
        let index = self
            .locales
            .iter()
            .position(|code| code == locale)
            .ok_or_else(|| TransitError::LocaleNotFound(locale.to_string()))?;
        self.active_locale = index;
        Ok(())
    }

    pub fn segment(&self, id: SegmentId) -> Result<&TransportSegment> {
        self.segments
            .get(id.index())
            .ok_or_else(|| TransitError::dangling(ArrayKind::Segment, id.get(), self.segments.len()))
    }

    /// Display form of the segment stored under `id`
    pub fn describe_segment(&self, id: SegmentId) -> Result<String> {
        self.segment(id)?.resolve_display_form(self)
    }

    pub fn segments_of_line(&self, line_id: LineId) -> impl Iterator<Item = &TransportSegment> + '_ {
        self.segments.iter().filter(move |segment| segment.line_id == line_id)
    }

    /// Check that every table lines up and every stored id resolves.
    pub fn validate(&self) -> Result<()> {
        if self.locale_texts.len() != self.locales.len() {
            return Err(TransitError::InvalidData(format!(
                "{} locales but {} text tables",
                self.locales.len(),
                self.locale_texts.len()
            )));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.locales.iter().find(|code| !seen.insert(code.as_str())) {
            return Err(TransitError::InvalidData(format!("duplicate locale {duplicate}")));
        }

        for (index, texts) in self.locale_texts.iter().enumerate() {
            for id in [self.country_name, self.city_name] {
                if id.index() >= texts.len() {
                    return Err(TransitError::InvalidData(format!(
                        "text {id} missing from locale {}",
                        self.locales[index]
                    )));
                }
            }
        }

        let text_len = self.texts().len();
        let check_text = |id: TextId| {
            if id.index() < text_len {
                Ok(())
            } else {
                Err(TransitError::dangling(ArrayKind::Text, id.get(), text_len))
            }
        };

        for line in &self.lines {
            check_text(line.name)?;
        }
        for station in &self.stations {
            check_text(station.name)?;
            if station.line_id.index() >= self.lines.len() {
                return Err(TransitError::dangling(
                    ArrayKind::Line,
                    station.line_id.get(),
                    self.lines.len(),
                ));
            }
        }
        for segment in &self.segments {
            for station in [segment.station_from_id, segment.station_to_id] {
                if station.index() >= self.stations.len() {
                    return Err(TransitError::dangling(
                        ArrayKind::Station,
                        station.get(),
                        self.stations.len(),
                    ));
                }
            }
            if segment.line_id.index() >= self.lines.len() {
                return Err(TransitError::dangling(
                    ArrayKind::Line,
                    segment.line_id.get(),
                    self.lines.len(),
                ));
            }
        }

        Ok(())
    }
}

impl TransitModel for Model {
    fn locales(&self) -> &[String] {
        &self.locales
    }

    fn locale_table_count(&self) -> usize {
        self.locale_texts.len()
    }

    fn locale_texts(&self, locale_index: usize) -> Option<&[Arc<str>]> {
        self.locale_texts.get(locale_index).map(Vec::as_slice)
    }

    fn texts(&self) -> &[Arc<str>] {
        self.locale_texts
            .get(self.active_locale)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn country_name(&self) -> TextId {
        self.country_name
    }

    fn city_name(&self) -> TextId {
        self.city_name
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn transport_types(&self) -> TransportTypes {
        let mut types = self.transport_types;
        for kind in self.lines.iter().filter_map(|line| line.kind) {
            types.insert(kind);
        }
        types
    }

    fn station_count(&self) -> usize {
        self.stations.len()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn station_name(&self, id: StationId) -> Option<TextId> {
        self.stations.get(id.index()).map(|station| station.name)
    }

    fn line_name(&self, id: LineId) -> Option<TextId> {
        self.lines.get(id.index()).map(|line| line.name)
    }
}
