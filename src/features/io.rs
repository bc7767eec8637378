//! Loading and saving `.geojson` files.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use geojson::GeoJson;

use super::FeatureCollection;

#[derive(Debug)]
pub enum GeoJsonIoError {
    Io(std::io::Error),
    Parse(geojson::Error),
    Serialize(serde_json::Error),
    /// The file parsed as GeoJSON but was not a FeatureCollection
    NotAFeatureCollection,
}

impl fmt::Display for GeoJsonIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoJsonIoError::Io(e) => write!(f, "file error: {e}"),
            GeoJsonIoError::Parse(e) => write!(f, "invalid GeoJSON: {e}"),
            GeoJsonIoError::Serialize(e) => write!(f, "could not serialize GeoJSON: {e}"),
            GeoJsonIoError::NotAFeatureCollection => {
                write!(f, "expected a FeatureCollection at the top level")
            }
        }
    }
}

impl From<std::io::Error> for GeoJsonIoError {
    fn from(e: std::io::Error) -> Self {
        GeoJsonIoError::Io(e)
    }
}

impl From<geojson::Error> for GeoJsonIoError {
    fn from(e: geojson::Error) -> Self {
        GeoJsonIoError::Parse(e)
    }
}

/// Load a feature collection from a `.geojson` file.
///
/// Returns the collection and the number of features skipped because their
/// geometry was missing or unsupported.
pub fn load_collection(path: &Path) -> Result<(FeatureCollection, usize), GeoJsonIoError> {
    let reader = BufReader::new(File::open(path)?);
    match GeoJson::from_reader(reader).map_err(geojson::Error::from)? {
        GeoJson::FeatureCollection(fc) => Ok(FeatureCollection::from_geojson(&fc)),
        _ => Err(GeoJsonIoError::NotAFeatureCollection),
    }
}

/// Save a feature collection as pretty-printed GeoJSON.
pub fn save_collection(path: &Path, data: &FeatureCollection) -> Result<(), GeoJsonIoError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &GeoJson::FeatureCollection(data.to_geojson()))
        .map_err(GeoJsonIoError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Feature, Geometry};
    use geo::Point;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("geoscribe-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("round_trip.geojson");

        let original = FeatureCollection::from_features(vec![Feature::new(Geometry::Point(
            Point::new(1.5, -2.5),
        ))]);

        save_collection(&path, &original).unwrap();
        let (loaded, skipped) = load_collection(&path).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(skipped, 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_collection(Path::new("/nonexistent/geoscribe.geojson")).unwrap_err();
        assert!(matches!(err, GeoJsonIoError::Io(_)));
    }

    #[test]
    fn test_load_rejects_bare_geometry() {
        let dir = std::env::temp_dir().join("geoscribe-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bare_geometry.geojson");
        std::fs::write(&path, r#"{"type":"Point","coordinates":[0.0,0.0]}"#).unwrap();

        let err = load_collection(&path).unwrap_err();
        assert!(matches!(err, GeoJsonIoError::NotAFeatureCollection));
        std::fs::remove_file(&path).ok();
    }
}
