//! Immutable feature collection with persistent-update edit operations.
//!
//! Every mutating operation returns a new collection; the receiver is never
//! touched. Out-of-bounds indexes and invalid position paths degrade to an
//! unchanged copy rather than panicking, so callers can apply edits without
//! pre-validating structure.

use serde_json::Map;

use crate::geometry::MapCoord;

use super::geometry::Geometry;

/// One geometry plus its properties. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Map<String, serde_json::Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_properties(geometry: Geometry, properties: Map<String, serde_json::Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Copy of this feature with a different geometry, properties preserved.
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: self.properties.clone(),
        }
    }
}

/// An ordered sequence of features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// New collection with `feature` appended.
    pub fn add_feature(&self, feature: Feature) -> Self {
        let mut features = self.features.clone();
        features.push(feature);
        Self { features }
    }

    /// New collection without the feature at `index`; unchanged copy when
    /// out of bounds.
    pub fn remove_feature(&self, index: usize) -> Self {
        let mut features = self.features.clone();
        if index < features.len() {
            features.remove(index);
        }
        Self { features }
    }

    /// New collection with the feature's geometry swapped, properties kept.
    pub fn replace_geometry(&self, index: usize, geometry: Geometry) -> Self {
        self.update_geometry(index, |_| Some(geometry.clone()))
    }

    /// New collection with a coordinate inserted at the position path.
    pub fn add_position(&self, index: usize, path: &[usize], position: MapCoord) -> Self {
        self.update_geometry(index, |g| g.insert_position(path, position))
    }

    /// New collection with the coordinate at the position path replaced.
    pub fn move_position(&self, index: usize, path: &[usize], position: MapCoord) -> Self {
        self.update_geometry(index, |g| g.move_position(path, position))
    }

    /// New collection with the coordinate at the position path removed.
    pub fn remove_position(&self, index: usize, path: &[usize]) -> Self {
        self.update_geometry(index, |g| g.remove_position(path))
    }

    fn update_geometry(
        &self,
        index: usize,
        update: impl FnOnce(&Geometry) -> Option<Geometry>,
    ) -> Self {
        let mut features = self.features.clone();
        if let Some(feature) = features.get_mut(index)
            && let Some(geometry) = update(&feature.geometry)
        {
            *feature = feature.with_geometry(geometry);
        }
        Self { features }
    }

    /// Materialize the plain GeoJSON feature collection.
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self
                .features
                .iter()
                .map(|f| geojson::Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(f.geometry.to_geojson_value())),
                    id: None,
                    properties: Some(f.properties.clone()),
                    foreign_members: None,
                })
                .collect(),
            foreign_members: None,
        }
    }

    /// Parse from a GeoJSON feature collection.
    ///
    /// Features with missing or unsupported geometry are skipped; the second
    /// return value counts them.
    pub fn from_geojson(collection: &geojson::FeatureCollection) -> (Self, usize) {
        let mut features = Vec::new();
        let mut skipped = 0;

        for feature in &collection.features {
            let geometry = feature
                .geometry
                .as_ref()
                .and_then(|g| Geometry::from_geojson_value(&g.value));
            match geometry {
                Some(geometry) => features.push(Feature::with_properties(
                    geometry,
                    feature.properties.clone().unwrap_or_default(),
                )),
                None => skipped += 1,
            }
        }

        (Self { features }, skipped)
    }
}
