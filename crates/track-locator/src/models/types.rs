//! Core data types and enums for position resolution.

use geo::Point;

use crate::config::LocatorConfig;

// ============================================================================
// Enums
// ============================================================================

/// Kind of trackside feature in the landmark catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LandmarkKind {
    LcGate,
    Curve,
    Bridge,
    Tunnel,
    LevelCrossing,
    Gradient,
    Station,
}

impl LandmarkKind {
    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "LC_GATE" => Some(Self::LcGate),
            "CURVE" => Some(Self::Curve),
            "BRIDGE" => Some(Self::Bridge),
            "TUNNEL" => Some(Self::Tunnel),
            "LEVEL_CROSSING" => Some(Self::LevelCrossing),
            "GRADIENT" => Some(Self::Gradient),
            "STATION" => Some(Self::Station),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::LcGate => "LC_GATE",
            Self::Curve => "CURVE",
            Self::Bridge => "BRIDGE",
            Self::Tunnel => "TUNNEL",
            Self::LevelCrossing => "LEVEL_CROSSING",
            Self::Gradient => "GRADIENT",
            Self::Station => "STATION",
        }
    }
}

/// Qualitative GPS fix quality derived from reported accuracy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LockStatus {
    Strong,
    Weak,
    NoFix,
}

impl LockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
            Self::NoFix => "no-fix",
        }
    }
}

/// Speed-restriction compliance level, ordered from least to most severe
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Where a position fix came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FixProvenance {
    /// Satellite receiver
    #[default]
    Gnss,
    /// Coarse IP-based geolocation used when the receiver is unavailable
    IpFallback,
    /// Generated by a simulated source
    Simulated,
}

/// Which catalog an operation needed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    Stations,
    Landmarks,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stations => write!(f, "station"),
            Self::Landmarks => write!(f, "landmark"),
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A WGS-84 latitude/longitude pair in degrees.
///
/// [`Coordinate::new`] does not check ranges. Use [`Coordinate::validated`]
/// at boundaries where the input is not already known to be well formed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);

        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(LocatorError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// geo uses x = longitude, y = latitude
    pub fn to_point(self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

/// A single sampled reading from a location source.
///
/// Fixes are immutable once built and are never stored by the resolver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub accuracy_m: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_mps: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heading_deg: Option<f64>,
    pub timestamp_ms: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub provenance: FixProvenance,
}

impl PositionFix {
    pub fn new(coordinate: Coordinate, accuracy_m: f64, timestamp_ms: i64) -> Self {
        Self {
            coordinate,
            accuracy_m,
            speed_mps: 0.0,
            heading_deg: None,
            timestamp_ms,
            provenance: FixProvenance::Gnss,
        }
    }

    /// Substitute fix from coarse IP geolocation.
    ///
    /// Carries the configured fallback accuracy so that lock classification
    /// always lands on [`LockStatus::NoFix`].
    pub fn ip_fallback(coordinate: Coordinate, timestamp_ms: i64, config: &LocatorConfig) -> Self {
        Self {
            provenance: FixProvenance::IpFallback,
            ..Self::new(coordinate, config.fallback_accuracy_m, timestamp_ms)
        }
    }

    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    /// Heading is normalized into [0, 360)
    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg.rem_euclid(360.0));
        self
    }

    pub fn with_provenance(mut self, provenance: FixProvenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps * 3.6
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == FixProvenance::IpFallback
    }

    /// Rough satellite count shown next to the lock badge.
    ///
    /// Receivers do not report this through the position API, so it is
    /// derived from accuracy and capped at 25. Fallback fixes have none.
    pub fn estimated_satellites(&self) -> u8 {
        if self.is_fallback() || !self.accuracy_m.is_finite() {
            return 0;
        }
        let estimate = (self.accuracy_m.max(0.0) / 2.0).floor() + 8.0;
        estimate.min(25.0) as u8
    }

    /// Check the fields the resolver relies on
    pub fn validate(&self) -> Result<()> {
        self.coordinate.validate()?;

        if !self.accuracy_m.is_finite() || self.accuracy_m < 0.0 {
            return Err(LocatorError::InvalidData(format!(
                "accuracy must be a non-negative number of meters, got {}",
                self.accuracy_m
            )));
        }

        if !self.speed_mps.is_finite() || self.speed_mps < 0.0 {
            return Err(LocatorError::InvalidData(format!(
                "speed must be a non-negative number of m/s, got {}",
                self.speed_mps
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("No {0} data loaded")]
    EmptyCatalog(CatalogKind),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Duplicate catalog identity: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Location source unavailable: {0}")]
    SourceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_kind_codes() {
        assert_eq!(LandmarkKind::from_code("LC_GATE"), Some(LandmarkKind::LcGate));
        assert_eq!(LandmarkKind::from_code("TUNNEL"), Some(LandmarkKind::Tunnel));
        assert_eq!(LandmarkKind::from_code("SIGNAL"), None);
        assert_eq!(LandmarkKind::Gradient.as_code(), "GRADIENT");
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::validated(11.0007, 76.9634).is_ok());
        assert!(Coordinate::validated(90.0, -180.0).is_ok());

        assert!(matches!(
            Coordinate::validated(91.0, 0.0),
            Err(LocatorError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::validated(0.0, 180.5).is_err());
        assert!(Coordinate::validated(f64::NAN, 0.0).is_err());
        assert!(Coordinate::validated(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_point_conversion_swaps_axes() {
        let coordinate = Coordinate::new(11.0, 76.0);
        let point = coordinate.to_point();
        assert_eq!(point.x(), 76.0);
        assert_eq!(point.y(), 11.0);
        assert_eq!(Coordinate::from(point), coordinate);
    }

    #[test]
    fn test_fix_speed_and_heading() {
        let fix = PositionFix::new(Coordinate::new(11.0, 76.9), 10.0, 0)
            .with_speed(10.0)
            .with_heading(-90.0);

        assert!((fix.speed_kmh() - 36.0).abs() < 1e-9);
        assert_eq!(fix.heading_deg, Some(270.0));
    }

    #[test]
    fn test_fallback_fix() {
        let config = LocatorConfig::default();
        let fix = PositionFix::ip_fallback(Coordinate::new(11.0, 76.9), 1_000, &config);

        assert!(fix.is_fallback());
        assert_eq!(fix.accuracy_m, 5000.0);
        assert_eq!(fix.speed_mps, 0.0);
        assert_eq!(fix.estimated_satellites(), 0);
    }

    #[test]
    fn test_estimated_satellites() {
        let fix = |accuracy| PositionFix::new(Coordinate::new(0.0, 0.0), accuracy, 0);

        assert_eq!(fix(5.0).estimated_satellites(), 10);
        assert_eq!(fix(0.0).estimated_satellites(), 8);
        assert_eq!(fix(80.0).estimated_satellites(), 25);
    }

    #[test]
    fn test_fix_validation() {
        let good = PositionFix::new(Coordinate::new(11.0, 76.9), 12.0, 0).with_speed(3.0);
        assert!(good.validate().is_ok());

        let negative_accuracy = PositionFix::new(Coordinate::new(11.0, 76.9), -1.0, 0);
        assert!(matches!(
            negative_accuracy.validate(),
            Err(LocatorError::InvalidData(_))
        ));

        let bad_speed = good.clone().with_speed(f64::NAN);
        assert!(bad_speed.validate().is_err());

        let bad_coordinate = PositionFix::new(Coordinate::new(-95.0, 0.0), 5.0, 0);
        assert!(matches!(
            bad_coordinate.validate(),
            Err(LocatorError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Normal < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }
}
