//! Forecast regions
//!
//! A region is a named bounding box plus the forecast points that make up
//! its message. The region name doubles as the message's location key.

use crate::composer::validate_location_key;
use crate::error::{self, RegionError};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Identifier used for a forecast point's series
    pub fn label(&self) -> String {
        format!("({}, {})", self.latitude, self.longitude)
    }
}

/// A named region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Location key, e.g. `mount_rainier`
    pub name: String,
    /// South-east corner of the bounding box
    pub southeast: Coordinate,
    /// North-west corner of the bounding box
    pub northwest: Coordinate,
    /// Forecast points sent for this region
    #[serde(default)]
    pub points: Vec<Coordinate>,
}

impl Region {
    /// Check whether a position lies strictly inside the bounding box
    pub fn contains(&self, position: Coordinate) -> bool {
        position.latitude > self.southeast.latitude
            && position.latitude < self.northwest.latitude
            && position.longitude < self.southeast.longitude
            && position.longitude > self.northwest.longitude
    }
}

/// Ordered set of regions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Region by name
    pub fn get(&self, name: &str) -> Result<&Region, RegionError> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RegionError::UnknownRegion(name.to_string()))
    }

    /// First region, in configuration order, containing `position`
    pub fn locate(&self, position: Coordinate) -> Result<&Region, RegionError> {
        self.regions
            .iter()
            .find(|r| r.contains(position))
            .ok_or(RegionError::NoMatch {
                latitude: position.latitude,
                longitude: position.longitude,
            })
    }

    /// Check that every region name is usable as a location key
    pub fn validate(&self) -> error::Result<()> {
        self.regions
            .iter()
            .try_for_each(|region| validate_location_key(&region.name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rainier() -> Region {
        Region {
            name: "mount_rainier".to_string(),
            southeast: Coordinate::new(46.7, -121.6),
            northwest: Coordinate::new(47.0, -121.9),
            points: vec![Coordinate::new(46.85, -121.76)],
        }
    }

    fn hood() -> Region {
        Region {
            name: "mt_hood".to_string(),
            southeast: Coordinate::new(45.2, -121.5),
            northwest: Coordinate::new(45.5, -121.9),
            points: Vec::new(),
        }
    }

    #[test]
    fn test_contains_strict() {
        let region = rainier();
        assert!(region.contains(Coordinate::new(46.85, -121.76)));
        assert!(!region.contains(Coordinate::new(46.7, -121.76)));
        assert!(!region.contains(Coordinate::new(46.85, -121.9)));
        assert!(!region.contains(Coordinate::new(45.3, -121.7)));
    }

    #[test]
    fn test_locate() {
        let map = RegionMap::new(vec![rainier(), hood()]);
        let found = map.locate(Coordinate::new(45.37, -121.69)).unwrap();
        assert_eq!(found.name, "mt_hood");
    }

    #[test]
    fn test_locate_no_match_is_error() {
        let map = RegionMap::new(vec![rainier(), hood()]);
        let err = map.locate(Coordinate::new(48.0, -120.0)).unwrap_err();
        assert!(matches!(err, RegionError::NoMatch { .. }));
    }

    #[test]
    fn test_get_unknown() {
        let map = RegionMap::new(vec![rainier()]);
        assert!(map.get("mount_rainier").is_ok());
        assert_eq!(
            map.get("mt_hood").unwrap_err(),
            RegionError::UnknownRegion("mt_hood".to_string())
        );
    }

    #[test]
    fn test_validate_names() {
        assert!(RegionMap::new(vec![rainier(), hood()]).validate().is_ok());

        let mut summits = hood();
        summits.name = "7_summits".to_string();
        assert!(RegionMap::new(vec![rainier(), summits]).validate().is_err());

        let mut accented = hood();
        accented.name = "\u{e9}a_x".to_string();
        assert!(RegionMap::new(vec![accented]).validate().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Coordinate::new(46.85, -121.76).label(), "(46.85, -121.76)");
    }
}
