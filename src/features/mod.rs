//! The GeoJSON-shaped data model: features, geometries, and the immutable
//! feature collection every edit operates on.
//!
//! ## Sub-modules
//!
//! - `geometry`: the [`Geometry`] enum over geo-types, position-path edits,
//!   and geojson conversions
//! - `collection`: [`Feature`] and the persistent-update [`FeatureCollection`]
//! - `io`: loading and saving `.geojson` files

mod collection;
mod geometry;
pub mod io;

pub use collection::{Feature, FeatureCollection};
pub use geometry::Geometry;
