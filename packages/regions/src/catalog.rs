//! The static ocean-basin catalog.
//!
//! Basins that span the antimeridian (the Pacific) are stored as two
//! disjoint rectangles sharing a display name, so every rectangle
//! satisfies `min_lon <= max_lon` and no range encodes a wraparound.
//! Rectangles are tested in catalog order; first match wins.

use crate::OceanRegion;

/// All cataloged ocean basins, in classification priority order.
pub static REGIONS: &[OceanRegion] = &[
    OceanRegion {
        id: "north-pacific-west",
        display_name: "North Pacific",
        min_lat: 0.0,
        max_lat: 66.5,
        min_lon: 120.0,
        max_lon: 180.0,
    },
    OceanRegion {
        id: "north-pacific-east",
        display_name: "North Pacific",
        min_lat: 0.0,
        max_lat: 66.5,
        min_lon: -180.0,
        max_lon: -100.0,
    },
    OceanRegion {
        id: "south-pacific-west",
        display_name: "South Pacific",
        min_lat: -60.0,
        max_lat: 0.0,
        min_lon: 130.0,
        max_lon: 180.0,
    },
    OceanRegion {
        id: "south-pacific-east",
        display_name: "South Pacific",
        min_lat: -60.0,
        max_lat: 0.0,
        min_lon: -180.0,
        max_lon: -70.0,
    },
    OceanRegion {
        id: "north-atlantic",
        display_name: "North Atlantic",
        min_lat: 0.0,
        max_lat: 66.5,
        min_lon: -80.0,
        max_lon: 20.0,
    },
    OceanRegion {
        id: "south-atlantic",
        display_name: "South Atlantic",
        min_lat: -60.0,
        max_lat: 0.0,
        min_lon: -70.0,
        max_lon: 20.0,
    },
    OceanRegion {
        id: "indian-ocean",
        display_name: "Indian Ocean",
        min_lat: -60.0,
        max_lat: 30.0,
        min_lon: 20.0,
        max_lon: 120.0,
    },
    OceanRegion {
        id: "arctic-ocean",
        display_name: "Arctic Ocean",
        min_lat: 66.5,
        max_lat: 90.0,
        min_lon: -180.0,
        max_lon: 180.0,
    },
    OceanRegion {
        id: "southern-ocean",
        display_name: "Southern Ocean",
        min_lat: -90.0,
        max_lat: -60.0,
        min_lon: -180.0,
        max_lon: 180.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rectangle_encodes_wraparound() {
        for region in REGIONS {
            assert!(
                region.min_lat <= region.max_lat,
                "{}: min_lat > max_lat",
                region.id
            );
            assert!(
                region.min_lon <= region.max_lon,
                "{}: min_lon > max_lon (wraparound must be split)",
                region.id
            );
        }
    }

    #[test]
    fn bounds_within_globe() {
        for region in REGIONS {
            assert!((-90.0..=90.0).contains(&region.min_lat), "{}", region.id);
            assert!((-90.0..=90.0).contains(&region.max_lat), "{}", region.id);
            assert!((-180.0..=180.0).contains(&region.min_lon), "{}", region.id);
            assert!((-180.0..=180.0).contains(&region.max_lon), "{}", region.id);
        }
    }

    #[test]
    fn ids_unique() {
        for (i, a) in REGIONS.iter().enumerate() {
            for b in &REGIONS[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate region id");
            }
        }
    }

    #[test]
    fn split_basins_share_display_name() {
        let west = REGIONS.iter().find(|r| r.id == "north-pacific-west");
        let east = REGIONS.iter().find(|r| r.id == "north-pacific-east");
        assert_eq!(
            west.map(|r| r.display_name),
            east.map(|r| r.display_name),
            "split halves must share a display name"
        );
    }
}
