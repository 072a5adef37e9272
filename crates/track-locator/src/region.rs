//! Coarse region names for display.
//!
//! A fixed table of latitude/longitude boxes, checked in order. This is a
//! display aid only; nothing in the resolver depends on it.

use crate::models::types::Coordinate;

struct RegionBox {
    name: &'static str,
    lat: (f64, f64),
    lon: (f64, f64),
}

impl RegionBox {
    fn contains(&self, c: Coordinate) -> bool {
        (self.lat.0..=self.lat.1).contains(&c.latitude) && (self.lon.0..=self.lon.1).contains(&c.longitude)
    }
}

const fn region(name: &'static str, lat: (f64, f64), lon: (f64, f64)) -> RegionBox {
    RegionBox { name, lat, lon }
}

/// Named areas, checked in order before the state-level box
const AREAS: &[RegionBox] = &[
    region("Ernakulam Junction Area, Kerala", (9.9, 10.2), (76.2, 76.4)),
    region("Palakkad Junction Area, Kerala", (10.7, 10.9), (76.6, 76.8)),
    region("Palakkad-Coimbatore Line, Kerala", (10.8, 11.0), (76.7, 76.9)),
    region("Kozhikode (Calicut) Area, Kerala", (11.1, 11.3), (75.3, 75.6)),
    region("Kannur Area, Kerala", (11.8, 12.0), (75.3, 75.5)),
    region("Kasaragod Area, Kerala", (12.4, 12.6), (74.9, 75.1)),
    region("Trivandrum Central Area, Kerala", (8.4, 8.6), (76.9, 77.0)),
    region("Coimbatore Junction Area, Tamil Nadu", (10.9, 11.1), (76.9, 77.0)),
    region("Coimbatore Region, Tamil Nadu", (10.6, 11.1), (76.5, 77.5)),
];

/// Catch-all for the rest of the Kerala box
const KERALA: RegionBox = region("Central Kerala", (8.3, 12.5), (74.8, 77.5));

/// Human-readable area name for a coordinate.
///
/// Falls back to `Location (lat, lon)` with four decimals when no box matches.
pub fn describe_region(coordinate: Coordinate) -> String {
    AREAS
        .iter()
        .chain(std::iter::once(&KERALA))
        .find(|area| area.contains(coordinate))
        .map(|area| area.name.to_string())
        .unwrap_or_else(|| {
            format!(
                "Location ({:.4}, {:.4})",
                coordinate.latitude, coordinate.longitude
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_kerala_areas() {
        assert_eq!(
            describe_region(Coordinate::new(9.98, 76.29)),
            "Ernakulam Junction Area, Kerala"
        );
        assert_eq!(
            describe_region(Coordinate::new(8.49, 76.95)),
            "Trivandrum Central Area, Kerala"
        );
    }

    #[test]
    fn test_first_matching_area_wins() {
        // Inside both the Palakkad Junction and Palakkad-Coimbatore boxes
        assert_eq!(
            describe_region(Coordinate::new(10.85, 76.75)),
            "Palakkad Junction Area, Kerala"
        );
    }

    #[test]
    fn test_kerala_without_named_area() {
        assert_eq!(describe_region(Coordinate::new(10.5, 76.2)), "Central Kerala");
    }

    #[test]
    fn test_coimbatore_areas() {
        // Both points also fall inside the broad Kerala box
        assert_eq!(
            describe_region(Coordinate::new(11.0007, 76.9634)),
            "Coimbatore Junction Area, Tamil Nadu"
        );
        assert_eq!(
            describe_region(Coordinate::new(10.6564, 77.1428)),
            "Coimbatore Region, Tamil Nadu"
        );
        assert_eq!(
            describe_region(Coordinate::new(11.0, 77.6)),
            "Location (11.0000, 77.6000)"
        );
    }

    #[test]
    fn test_fallback_format() {
        assert_eq!(
            describe_region(Coordinate::new(-33.86882, 151.20929)),
            "Location (-33.8688, 151.2093)"
        );
    }
}
