//! Embedded reference catalogs.
//!
//! These are fixed demonstration datasets compiled into the binary. Changing
//! an entry means redeploying; there is no runtime registry.

use crate::catalog::static_catalog::{Landmark, StaticFeatureCatalog, Station};
use crate::identifiers::{LandmarkId, StationCode};
use crate::models::types::{Coordinate, LandmarkKind, Result};

struct StationRow {
    code: &'static str,
    name: &'static str,
    location: (f64, f64),
    track_km: f64,
    block_section: (&'static str, &'static str),
    division: &'static str,
    route: &'static str,
    state: &'static str,
    platform_count: u8,
}

impl StationRow {
    fn to_station(&self) -> Station {
        Station {
            code: StationCode::new(self.code),
            name: self.name.into(),
            location: Coordinate::new(self.location.0, self.location.1),
            track_km: self.track_km,
            block_section_start: self.block_section.0.into(),
            block_section_end: self.block_section.1.into(),
            division: self.division.into(),
            route: self.route.into(),
            state: self.state.into(),
            platform_count: self.platform_count,
        }
    }
}

struct LandmarkRow {
    id: &'static str,
    kind: LandmarkKind,
    name: &'static str,
    location: (f64, f64),
    track_km: f64,
    speed_restriction_kmh: Option<f64>,
    curve_radius_m: Option<f64>,
    gradient_percent: Option<f64>,
}

impl LandmarkRow {
    fn to_landmark(&self) -> Landmark {
        Landmark {
            id: LandmarkId::new(self.id),
            kind: self.kind,
            name: self.name.into(),
            location: Coordinate::new(self.location.0, self.location.1),
            track_km: self.track_km,
            speed_restriction_kmh: self.speed_restriction_kmh,
            curve_radius_m: self.curve_radius_m,
            gradient_percent: self.gradient_percent,
        }
    }
}

/// Coimbatore region stations (Salem division)
const COIMBATORE_STATIONS: &[StationRow] = &[
    StationRow {
        code: "CBE",
        name: "Coimbatore Junction",
        location: (11.0007, 76.9634),
        track_km: 0.0,
        block_section: ("Coimbatore", "Mettupalayam"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 8,
    },
    StationRow {
        code: "MTP",
        name: "Mettupalayam",
        location: (11.3088, 76.5631),
        track_km: 46.2,
        block_section: ("Mettupalayam", "Coimbatore"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 3,
    },
    StationRow {
        code: "UDM",
        name: "Udumalpet",
        location: (10.9453, 77.0453),
        track_km: 32.5,
        block_section: ("Coimbatore", "Udumalpet"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 2,
    },
    StationRow {
        code: "POL",
        name: "Pollachi",
        location: (10.6564, 77.1428),
        track_km: 68.8,
        block_section: ("Pollachi", "Coimbatore"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 3,
    },
    StationRow {
        code: "KNR",
        name: "Kannur",
        location: (11.5572, 76.3713),
        track_km: 55.0,
        block_section: ("Kannur", "Mettupalayam"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 2,
    },
    StationRow {
        code: "SAL",
        name: "Salem Junction",
        location: (11.4631, 78.1451),
        track_km: 120.5,
        block_section: ("Salem", "Coimbatore"),
        division: "Salem Division",
        route: "Southern Railway",
        state: "Tamil Nadu",
        platform_count: 6,
    },
];

/// Trackside features around Coimbatore
const COIMBATORE_LANDMARKS: &[LandmarkRow] = &[
    LandmarkRow {
        id: "LC101",
        kind: LandmarkKind::LcGate,
        name: "LC Gate No. 101",
        location: (11.008, 76.965),
        track_km: 1.2,
        speed_restriction_kmh: Some(15.0),
        curve_radius_m: None,
        gradient_percent: None,
    },
    LandmarkRow {
        id: "CURVE_CBE",
        kind: LandmarkKind::Curve,
        name: "Coimbatore Curve Section",
        location: (11.015, 76.955),
        track_km: 2.5,
        speed_restriction_kmh: Some(40.0),
        curve_radius_m: Some(600.0),
        gradient_percent: None,
    },
    LandmarkRow {
        id: "BR201",
        kind: LandmarkKind::Bridge,
        name: "Noyyal River Bridge",
        location: (11.025, 76.945),
        track_km: 3.8,
        speed_restriction_kmh: Some(50.0),
        curve_radius_m: None,
        gradient_percent: None,
    },
    LandmarkRow {
        id: "TUN_CBE",
        kind: LandmarkKind::Tunnel,
        name: "Coimbatore Tunnel Section 1",
        location: (11.08, 76.85),
        track_km: 12.5,
        speed_restriction_kmh: None,
        curve_radius_m: None,
        gradient_percent: None,
    },
    LandmarkRow {
        id: "LC102",
        kind: LandmarkKind::LcGate,
        name: "LC Gate No. 102",
        location: (11.15, 76.78),
        track_km: 25.3,
        speed_restriction_kmh: Some(10.0),
        curve_radius_m: None,
        gradient_percent: None,
    },
    LandmarkRow {
        id: "BR202",
        kind: LandmarkKind::Bridge,
        name: "Mountain Bridge",
        location: (11.22, 76.72),
        track_km: 33.5,
        speed_restriction_kmh: Some(35.0),
        curve_radius_m: None,
        gradient_percent: None,
    },
];

/// Kerala main-line stations (Trivandrum and Palakkad divisions)
const KERALA_STATIONS: &[StationRow] = &[
    StationRow {
        code: "ERS",
        name: "Ernakulam Junction (South)",
        location: (9.9791, 76.2855),
        track_km: 586.0,
        block_section: ("Ernakulam Town", "Thrippunithura"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam Main Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "ERN",
        name: "Ernakulam Town (North)",
        location: (9.9986, 76.2893),
        track_km: 583.0,
        block_section: ("Aluva", "Ernakulam Jn"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam Main Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "AWY",
        name: "Aluva",
        location: (10.1076, 76.3521),
        track_km: 570.0,
        block_section: ("Angamaly", "Ernakulam Town"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam Main Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "AFK",
        name: "Angamaly",
        location: (10.1963, 76.3867),
        track_km: 558.0,
        block_section: ("Chalakudy", "Aluva"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam Main Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "PGT",
        name: "Palakkad Junction",
        location: (10.774, 76.651),
        track_km: 510.0,
        block_section: ("Kollengode", "Palakkad Town"),
        division: "Palakkad",
        route: "Palakkad – Coimbatore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "PGTN",
        name: "Palakkad Town",
        location: (10.7749, 76.6599),
        track_km: 511.0,
        block_section: ("Palakkad Jn", "Kanjikode"),
        division: "Palakkad",
        route: "Palakkad – Coimbatore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "KJKD",
        name: "Kanjikode",
        location: (10.8075, 76.74),
        track_km: 518.0,
        block_section: ("Palakkad Town", "Walayar"),
        division: "Palakkad",
        route: "Palakkad – Coimbatore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "WRA",
        name: "Walayar",
        location: (10.8395, 76.852),
        track_km: 528.0,
        block_section: ("Kanjikode", "Ettimadai"),
        division: "Palakkad",
        route: "Palakkad – Coimbatore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "TVC",
        name: "Trivandrum Central",
        location: (8.4871, 76.9523),
        track_km: 676.0,
        block_section: ("Kochuveli", "Neyyattinkara"),
        division: "Trivandrum",
        route: "Trivandrum – Nagercoil Main Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "KCVL",
        name: "Kochuveli",
        location: (8.5243, 76.9174),
        track_km: 670.0,
        block_section: ("Veli", "Trivandrum Central"),
        division: "Trivandrum",
        route: "Trivandrum Suburban",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "NYN",
        name: "Neyyattinkara",
        location: (8.3997, 77.0851),
        track_km: 683.0,
        block_section: ("Dhanuvachapuram", "Trivandrum Central"),
        division: "Trivandrum",
        route: "Trivandrum – Nagercoil",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "CLT",
        name: "Kozhikode (Calicut)",
        location: (11.2588, 75.7804),
        track_km: 438.0,
        block_section: ("West Hill", "Feroke"),
        division: "Palakkad",
        route: "Shoranur – Mangalore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "FK",
        name: "Feroke",
        location: (11.184, 75.8416),
        track_km: 431.0,
        block_section: ("Kadalundi", "Kozhikode"),
        division: "Palakkad",
        route: "Shoranur – Mangalore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "TIR",
        name: "Tirur",
        location: (10.9167, 75.9193),
        track_km: 403.0,
        block_section: ("Parappanangadi", "Tanur"),
        division: "Palakkad",
        route: "Shoranur – Mangalore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "TCR",
        name: "Thrissur",
        location: (10.5206, 76.2144),
        track_km: 539.0,
        block_section: ("Poonkunnam", "Mulankunnathukavu"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "WKI",
        name: "Wadakkanchery",
        location: (10.6168, 76.2422),
        track_km: 546.0,
        block_section: ("Mulankunnathukavu", "Ollur"),
        division: "Trivandrum",
        route: "Shoranur – Ernakulam",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "SRR",
        name: "Shoranur Junction",
        location: (10.7614, 76.2745),
        track_km: 515.0,
        block_section: ("Vallathole Nagar", "Karakkad"),
        division: "Palakkad",
        route: "Kerala Central Junction",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "CAN",
        name: "Kannur",
        location: (11.8745, 75.3739),
        track_km: 350.0,
        block_section: ("Kannur South", "Kannapuram"),
        division: "Palakkad",
        route: "Shoranur – Mangalore Line",
        state: "Kerala",
        platform_count: 0,
    },
    StationRow {
        code: "KGQ",
        name: "Kasaragod",
        location: (12.4984, 74.9898),
        track_km: 305.0,
        block_section: ("Kumbala", "Uppala"),
        division: "Palakkad",
        route: "Shoranur – Mangalore Line",
        state: "Kerala",
        platform_count: 0,
    },
];

fn build(stations: &[StationRow], landmarks: &[LandmarkRow]) -> Result<StaticFeatureCatalog> {
    StaticFeatureCatalog::from_data(
        stations.iter().map(StationRow::to_station).collect(),
        landmarks.iter().map(LandmarkRow::to_landmark).collect(),
    )
}

/// Coimbatore region stations together with their trackside landmarks
pub fn coimbatore_region() -> Result<StaticFeatureCatalog> {
    build(COIMBATORE_STATIONS, COIMBATORE_LANDMARKS)
}

/// Kerala main-line stations. This catalog carries no landmarks.
pub fn kerala_main_line() -> Result<StaticFeatureCatalog> {
    build(KERALA_STATIONS, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::FeatureCatalog;

    #[test]
    fn test_coimbatore_catalog_loads() {
        let catalog = coimbatore_region().unwrap();
        assert_eq!(catalog.stations().len(), 6);
        assert_eq!(catalog.landmarks().len(), 6);

        let cbe = catalog.get_station(&StationCode::new("CBE")).unwrap();
        assert_eq!(&*cbe.name, "Coimbatore Junction");
        assert_eq!(cbe.track_km, 0.0);
        assert_eq!(cbe.platform_count, 8);

        let curve = catalog.get_landmark(&LandmarkId::new("CURVE_CBE")).unwrap();
        assert_eq!(curve.kind, LandmarkKind::Curve);
        assert_eq!(curve.curve_radius_m, Some(600.0));
        assert_eq!(curve.speed_restriction_kmh, Some(40.0));

        let tunnel = catalog.get_landmark(&LandmarkId::new("TUN_CBE")).unwrap();
        assert_eq!(tunnel.speed_restriction_kmh, None);
    }

    #[test]
    fn test_kerala_catalog_loads() {
        let catalog = kerala_main_line().unwrap();
        assert_eq!(catalog.stations().len(), 19);
        assert!(catalog.landmarks().is_empty());

        let srr = catalog.get_station(&StationCode::new("SRR")).unwrap();
        assert_eq!(&*srr.division, "Palakkad");
        assert_eq!(srr.track_km, 515.0);
    }

    #[test]
    fn test_builtin_coordinates_are_valid() {
        for catalog in [coimbatore_region().unwrap(), kerala_main_line().unwrap()] {
            for station in catalog.stations() {
                assert!(station.location.validate().is_ok(), "{}", station.code);
            }
            for landmark in catalog.landmarks() {
                assert!(landmark.location.validate().is_ok(), "{}", landmark.id);
            }
        }
    }
}
