//! Country outlines for globe labels.
//!
//! Loaded once from a local GeoJSON FeatureCollection. This data is purely
//! decorative: when the file is missing or malformed the engine carries on
//! with an empty set.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::geometry::{polygon_centroid, ring_area};
use crate::types::GeoCoord;

/// Property keys checked, in order, for a country's display name.
const NAME_KEYS: [&str; 4] = ["name", "NAME", "ADMIN", "admin"];

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to read boundaries from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse boundaries: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// A single country outline.
#[derive(Clone, Debug, PartialEq)]
pub struct CountryShape {
    pub name: String,
    /// Outer rings as `[lng, lat]`, one per polygon part.
    pub rings: Vec<Vec<[f64; 2]>>,
    /// Label anchor: centroid of the largest part.
    pub centroid: Option<GeoCoord>,
}

/// All loaded country outlines.
#[derive(Resource, Clone, Debug, Default)]
pub struct CountryBoundaries {
    pub countries: Vec<CountryShape>,
}

impl CountryBoundaries {
    pub fn from_geojson_str(json: &str) -> Result<Self, BoundaryError> {
        let collection: FeatureCollection = serde_json::from_str(json)?;
        let countries = collection
            .features
            .into_iter()
            .filter_map(country_from_feature)
            .collect();
        Ok(Self { countries })
    }

    pub fn from_file(path: &Path) -> Result<Self, BoundaryError> {
        let contents = fs::read_to_string(path).map_err(|source| BoundaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson_str(&contents)
    }

    /// Load from `path`, or an empty set if that fails.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(boundaries) => {
                info!("Loaded {} country outlines", boundaries.len());
                boundaries
            }
            Err(err) => {
                warn!("Country boundaries unavailable: {err}");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CountryShape> {
        self.countries.iter().find(|c| c.name == name)
    }
}

fn country_from_feature(feature: Feature) -> Option<CountryShape> {
    let rings: Vec<Vec<[f64; 2]>> = match feature.geometry? {
        Geometry::Polygon { coordinates } => coordinates.into_iter().take(1).map(to_ring).collect(),
        Geometry::MultiPolygon { coordinates } => coordinates
            .into_iter()
            .filter_map(|polygon| polygon.into_iter().next())
            .map(to_ring)
            .collect(),
        Geometry::Unsupported => return None,
    };
    let rings: Vec<_> = rings.into_iter().filter(|r| !r.is_empty()).collect();
    if rings.is_empty() {
        return None;
    }

    let name = feature
        .properties
        .as_ref()
        .and_then(|props| {
            NAME_KEYS
                .iter()
                .find_map(|key| props.get(*key).and_then(Value::as_str))
        })
        .unwrap_or("Unknown")
        .to_string();

    let centroid = rings
        .iter()
        .max_by(|a, b| ring_area(a).total_cmp(&ring_area(b)))
        .and_then(|ring| polygon_centroid(ring));

    Some(CountryShape {
        name,
        rings,
        centroid,
    })
}

/// Keep `[lng, lat]` from each position, dropping malformed ones.
fn to_ring(positions: Vec<Vec<f64>>) -> Vec<[f64; 2]> {
    positions
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(|p| [p[0], p[1]])
        .collect()
}

/// Load boundaries named in the config, if any.
pub fn load_country_boundaries(mut commands: Commands, config: Res<EngineConfig>) {
    let boundaries = match &config.boundaries_path {
        Some(path) => CountryBoundaries::load_or_empty(path),
        None => CountryBoundaries::default(),
    };
    commands.insert_resource(boundaries);
}

/// Plugin loading country outlines at startup.
pub struct BoundariesPlugin;

impl Plugin for BoundariesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .init_resource::<CountryBoundaries>()
            .add_systems(Startup, load_country_boundaries);
    }
}
