//! Core traits for parsed transit maps.
//!
//! A parsed map owns interned text, stations and lines in flat arrays and
//! hands out integer ids into them. Everything that needs display text
//! (flyweight segments, catalog descriptors) reads through this trait and
//! never copies the arrays.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Model Trait
// ============================================================================

/// Read-only view of one parsed transit map
pub trait TransitModel: Send + Sync {
    // ---- Localization ----

    /// Locale codes, in the order the source declared them
    fn locales(&self) -> &[String];

    /// Number of per-locale text tables
    fn locale_table_count(&self) -> usize;

    /// Text table for the locale at `locale_index` in [`Self::locales`]
    fn locale_texts(&self, locale_index: usize) -> Option<&[Arc<str>]>;

    /// Text table for the active display locale
    fn texts(&self) -> &[Arc<str>];

    // ---- Map metadata ----
    fn country_name(&self) -> TextId;
    fn city_name(&self) -> TextId;

    /// Content timestamp of the source, milliseconds since the epoch
    fn timestamp(&self) -> i64;
    /// Transport kinds present in the map, including those of its lines
    fn transport_types(&self) -> TransportTypes;

    // ---- Structure ----
    fn station_count(&self) -> usize;
    fn line_count(&self) -> usize;

    /// Text id of the station's name, if the station exists
    fn station_name(&self, id: StationId) -> Option<TextId>;

    /// Text id of the line's name, if the line exists
    fn line_name(&self, id: LineId) -> Option<TextId>;

    // ---- Resolution helpers ----

    fn text(&self, id: TextId) -> Result<&str> {
        let texts = self.texts();
        texts
            .get(id.index())
            .map(|text| &**text)
            .ok_or_else(|| TransitError::dangling(ArrayKind::Text, id.get(), texts.len()))
    }

    fn localized_text(&self, locale_index: usize, id: TextId) -> Result<&str> {
        let texts = self.locale_texts(locale_index).ok_or_else(|| {
            TransitError::dangling(
                ArrayKind::Locale,
                u32::try_from(locale_index).unwrap_or(u32::MAX),
                self.locale_table_count(),
            )
        })?;
        texts
            .get(id.index())
            .map(|text| &**text)
            .ok_or_else(|| TransitError::dangling(ArrayKind::Text, id.get(), texts.len()))
    }

    fn station_display_name(&self, id: StationId) -> Result<&str> {
        let name = self
            .station_name(id)
            .ok_or_else(|| TransitError::dangling(ArrayKind::Station, id.get(), self.station_count()))?;
        self.text(name)
    }

    fn line_display_name(&self, id: LineId) -> Result<&str> {
        let name = self
            .line_name(id)
            .ok_or_else(|| TransitError::dangling(ArrayKind::Line, id.get(), self.line_count()))?;
        self.text(name)
    }
}
