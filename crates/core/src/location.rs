//! Named point locations used as reference sets for distances and labeling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named latitude/longitude coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn has_nan(&self) -> bool {
        self.lat.is_nan() || self.lon.is_nan()
    }
}

/// An ordered set of locations.
///
/// Order matters: label grids store indices into this set, and ties between
/// equidistant locations resolve to the lowest index. Coordinates need not be
/// distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationSet {
    locations: Vec<Location>,
}

impl LocationSet {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn push(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Fail with the first location holding a NaN coordinate
    pub fn check_coordinates(&self) -> Result<()> {
        match self.locations.iter().position(Location::has_nan) {
            Some(index) => Err(Error::NotANumber(format!(
                "location {} ({:?}) has coordinates ({}, {})",
                index, self.locations[index].name, self.locations[index].lat, self.locations[index].lon
            ))),
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64, f64)> for LocationSet {
    fn from_iter<I: IntoIterator<Item = (S, f64, f64)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, lat, lon)| Location::new(name, lat, lon))
                .collect(),
        )
    }
}

impl FromIterator<Location> for LocationSet {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for LocationSet {
    type Item = Location;
    type IntoIter = std::vec::IntoIter<Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.into_iter()
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}
