//! Zone catalog keyed by body area and anatomical variant

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::zone::{BodyArea, Gender, ZoneCategory, ZoneDefinition, ZoneId};
use crate::CatalogError;

/// Version of the built-in zone tables
pub const CATALOG_VERSION: &str = "2024.1";

/// Label used when a zone id cannot be resolved
pub const UNKNOWN_ZONE_NAME: &str = "Unknown Zone";

/// Lookup key: body area plus optional gender-specific variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogKey {
    pub body_area: BodyArea,
    pub gender: Option<Gender>,
}

impl CatalogKey {
    /// Zones shared by all anatomical variants
    pub fn unisex(body_area: BodyArea) -> Self {
        Self {
            body_area,
            gender: None,
        }
    }

    /// Zones specific to one anatomical variant
    pub fn variant(body_area: BodyArea, gender: Gender) -> Self {
        Self {
            body_area,
            gender: Some(gender),
        }
    }
}

/// Immutable, shareable set of zone definitions.
///
/// Each zone list is ordered by priority ascending (most specific first);
/// zones with equal priority keep insertion order.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    version: String,
    sets: BTreeMap<CatalogKey, Vec<ZoneDefinition>>,
}

impl ZoneCatalog {
    /// Built-in face, torso and full-body tables
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = crate::data::builtin_catalog()?;
        info!(
            "Loaded zone catalog v{} ({} zones)",
            catalog.version,
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Zones for a body area and variant. Falls back to the unisex set
    /// when no variant-specific set exists; empty if neither does.
    pub fn zones_for(&self, body_area: BodyArea, gender: Gender) -> &[ZoneDefinition] {
        self.sets
            .get(&CatalogKey::variant(body_area, gender))
            .or_else(|| self.sets.get(&CatalogKey::unisex(body_area)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unisex zones for a body area
    pub fn zones_for_area(&self, body_area: BodyArea) -> &[ZoneDefinition] {
        self.zones_for_key(CatalogKey::unisex(body_area))
    }

    /// Exact key lookup without fallback
    pub fn zones_for_key(&self, key: CatalogKey) -> &[ZoneDefinition] {
        self.sets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Zone by id within the set active for an area and variant
    pub fn find_zone(&self, body_area: BodyArea, gender: Gender, id: &ZoneId) -> Option<&ZoneDefinition> {
        self.zones_for(body_area, gender).iter().find(|z| &z.id == id)
    }

    /// First zone with this id across all sets, in key order
    pub fn zone_by_id(&self, id: &ZoneId) -> Option<&ZoneDefinition> {
        self.sets.values().flatten().find(|z| &z.id == id)
    }

    /// Display name for a zone id
    pub fn zone_name(&self, id: &ZoneId) -> &str {
        self.zone_by_id(id)
            .map(|z| z.name.as_str())
            .unwrap_or(UNKNOWN_ZONE_NAME)
    }

    /// Zones of one category within an area's active set
    pub fn zones_by_category(
        &self,
        body_area: BodyArea,
        gender: Gender,
        category: ZoneCategory,
    ) -> Vec<&ZoneDefinition> {
        self.zones_for(body_area, gender)
            .iter()
            .filter(|z| z.category == category)
            .collect()
    }

    /// Risk-flagged zones for the safety overlay
    pub fn danger_zones(&self, body_area: BodyArea, gender: Gender) -> Vec<&ZoneDefinition> {
        self.zones_for(body_area, gender)
            .iter()
            .filter(|z| z.is_danger_zone())
            .collect()
    }

    /// Registered keys in deterministic order
    pub fn keys(&self) -> impl Iterator<Item = &CatalogKey> {
        self.sets.keys()
    }

    /// Total zone count across all sets
    pub fn len(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for custom catalogs
#[derive(Debug, Default)]
pub struct ZoneCatalogBuilder {
    version: Option<String>,
    sets: BTreeMap<CatalogKey, Vec<ZoneDefinition>>,
}

impl ZoneCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Register a zone under a key; ids must be unique per key
    pub fn add(&mut self, key: CatalogKey, zone: ZoneDefinition) -> Result<&mut Self, CatalogError> {
        let set = self.sets.entry(key).or_default();
        if set.iter().any(|z| z.id == zone.id) {
            return Err(CatalogError::DuplicateZone(zone.id.to_string()));
        }
        debug!("Registered zone {} for {:?}", zone.id, key);
        set.push(zone);
        Ok(self)
    }

    /// Freeze into a catalog, ordering each set by priority
    pub fn build(mut self) -> ZoneCatalog {
        for set in self.sets.values_mut() {
            // Stable: equal priorities keep insertion order
            set.sort_by_key(|z| z.priority);
        }
        ZoneCatalog {
            version: self.version.unwrap_or_else(|| CATALOG_VERSION.to_string()),
            sets: self.sets,
        }
    }
}
