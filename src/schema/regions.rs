//! Named geographic regions and their bounding boxes.
//!
//! Coordinates are decimal degrees; south latitudes and west longitudes are
//! negative. A box whose `min_lon` is greater than its `max_lon` crosses
//! the antimeridian.

use super::field::Term;

/// A named region with its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Region {
    /// `true` if the longitude range wraps across 180°.
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Check whether a point lies inside the box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let lat_ok = lat >= self.min_lat && lat <= self.max_lat;
        let lon_ok = if self.crosses_antimeridian() {
            lon >= self.min_lon || lon <= self.max_lon
        } else {
            lon >= self.min_lon && lon <= self.max_lon
        };
        lat_ok && lon_ok
    }
}

const fn region(name: &'static str, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Region {
    Region {
        name,
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Region table, in match priority order.
pub const REGIONS: &[Region] = &[
    // Continents
    region("North America", 10.0, 72.0, -170.0, -50.0),
    region("South America", -56.0, 15.0, -90.0, -30.0),
    region("Europe", 36.0, 72.0, -10.0, 40.0),
    region("Asia", 0.0, 80.0, 40.0, 180.0),
    region("Africa", -35.0, 37.0, -20.0, 52.0),
    region("Australia", -45.0, -10.0, 110.0, 155.0),
    region("Antarctica", -90.0, -60.0, -180.0, 180.0),
    // Oceans
    region("Pacific Ocean", -60.0, 65.0, 120.0, -70.0),
    region("Atlantic Ocean", -70.0, 65.0, -80.0, 20.0),
    region("Indian Ocean", -70.0, 30.0, 20.0, 120.0),
    region("Arctic Ocean", 65.0, 90.0, -180.0, 180.0),
    region("Southern Ocean", -90.0, -60.0, -180.0, 180.0),
    // Specific regions
    region("Mediterranean", 30.0, 46.0, -5.0, 36.0),
    region("Caribbean", 8.0, 28.0, -90.0, -60.0),
    region("Middle East", 12.0, 42.0, 24.0, 63.0),
    region("Southeast Asia", -10.0, 30.0, 90.0, 150.0),
    // Climate zones
    region("Tropics", -23.5, 23.5, -180.0, 180.0),
    region("Arctic", 66.5, 90.0, -180.0, 180.0),
    region("Antarctic", -90.0, -66.5, -180.0, 180.0),
    // ENSO regions
    region("Niño 3.4", -5.0, 5.0, -170.0, -120.0),
    region("Niño 3", -5.0, 5.0, -150.0, -90.0),
    region("Niño 4", -5.0, 5.0, 160.0, -150.0),
    region("Niño 1+2", -10.0, 0.0, -90.0, -80.0),
    // Other common regions
    region("Tropical Pacific", -23.5, 23.5, 120.0, -70.0),
    region("North Atlantic", 30.0, 65.0, -80.0, 0.0),
    region("South Atlantic", -60.0, 0.0, -70.0, 20.0),
    region("North Pacific", 30.0, 65.0, 120.0, -100.0),
    region("South Pacific", -60.0, 0.0, 150.0, -70.0),
    region("Western Europe", 36.0, 72.0, -10.0, 20.0),
    region("Eastern Europe", 36.0, 72.0, 20.0, 40.0),
    region("East Asia", 10.0, 50.0, 100.0, 145.0),
    region("South Asia", 5.0, 40.0, 60.0, 100.0),
    region("Central America", 7.0, 33.0, -120.0, -60.0),
    region("Greenland", 60.0, 85.0, -75.0, -10.0),
    region("Amazon Basin", -20.0, 5.0, -80.0, -45.0),
    region("Sahara", 15.0, 35.0, -15.0, 35.0),
    region("Tibetan Plateau", 25.0, 40.0, 70.0, 105.0),
    region("Himalayas", 25.0, 40.0, 70.0, 95.0),
];

/// Find a region by its canonical name.
pub fn get(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name == name)
}

/// Vocabulary terms for the `location` field.
pub fn terms() -> Vec<Term> {
    REGIONS.iter().map(|r| Term::new(r.name, &[])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_resolves_to_most_specific_region() {
        let schema = crate::schema::parameter_schema();
        assert_eq!(schema.resolve("location", "Antarctic Peninsula"), Some("Antarctic"));
        assert_eq!(schema.resolve("location", "Arctic"), Some("Arctic"));
        assert_eq!(schema.resolve("location", "western tropical pacific"), Some("Tropical Pacific"));
    }

    #[test]
    fn test_latitudes_ordered() {
        for r in REGIONS {
            assert!(r.min_lat <= r.max_lat, "{}", r.name);
        }
    }

    #[test]
    fn test_antimeridian_boxes() {
        let pacific = get("Pacific Ocean").unwrap();
        assert!(pacific.crosses_antimeridian());
        assert!(pacific.contains(0.0, 170.0));
        assert!(pacific.contains(0.0, -150.0));
        assert!(!pacific.contains(0.0, 0.0));

        let europe = get("Europe").unwrap();
        assert!(!europe.crosses_antimeridian());
        assert!(europe.contains(48.8, 2.3));
        assert!(!europe.contains(40.7, -74.0));
    }
}
