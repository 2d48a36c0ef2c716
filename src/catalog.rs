//! Fixed catalog of physical store locations.

use crate::models::Location;

/// `(id, name, description, address, (lat, lon), type)`
type LocationRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    (f64, f64),
    &'static str,
);

const LOCATIONS: [LocationRow; 3] = [
    (
        "1",
        "Alger",
        "Best store in Algiers",
        "Algiers, Algeria",
        (39.7538, 3.0588),
        "Shop",
    ),
    (
        "2",
        "Oran Market",
        "Famous marketplace in Oran",
        "Oran, Algeria",
        (35.6977, -0.6331),
        "Market",
    ),
    (
        "3",
        "Constantine Mall",
        "A great shopping mall in Constantine",
        "Constantine, Algeria",
        (36.3650, 6.6147),
        "Mall",
    ),
];

/// Read-only source of store locations.
///
/// ```
/// use rayna_store::LocationCatalog;
///
/// let ids: Vec<String> = LocationCatalog.list().into_iter().map(|l| l.id).collect();
/// assert_eq!(ids, ["1", "2", "3"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationCatalog;

impl LocationCatalog {
    /// All known locations, always in the same order.
    pub fn list(&self) -> Vec<Location> {
        LOCATIONS.iter().map(to_location).collect()
    }

    /// Look up a single location by id.
    pub fn get(&self, id: &str) -> Option<Location> {
        LOCATIONS
            .iter()
            .find(|entry| entry.0 == id)
            .map(to_location)
    }
}

fn to_location(&(id, name, description, address, coordinates, kind): &LocationRow) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        address: address.to_string(),
        coordinates,
        kind: kind.to_string(),
    }
}
