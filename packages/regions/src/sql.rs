//! SQL rendering for spatial joins against the catalog.

use std::fmt::Write as _;

use crate::catalog::REGIONS;

/// Renders the catalog as a `region_boxes(...) AS (VALUES ...)` common
/// table expression body, for use as `WITH {cte} SELECT ...`.
///
/// Every value is a compiled-in catalog constant; nothing user-supplied
/// is ever interpolated here.
#[must_use]
pub fn region_boxes_cte() -> String {
    let mut cte =
        String::from("region_boxes(region_id, min_lat, max_lat, min_lon, max_lon) AS (VALUES\n");

    for (i, region) in REGIONS.iter().enumerate() {
        let sep = if i + 1 == REGIONS.len() { "" } else { "," };
        let _ = writeln!(
            cte,
            "  ('{}', {:?}, {:?}, {:?}, {:?}){sep}",
            region.id, region.min_lat, region.max_lat, region.min_lon, region.max_lon,
        );
    }

    cte.push(')');
    cte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cte_lists_every_region() {
        let cte = region_boxes_cte();
        for region in REGIONS {
            assert!(cte.contains(region.id), "missing {}", region.id);
        }
    }

    #[test]
    fn cte_has_no_placeholders() {
        // The fragment is built purely from catalog constants.
        assert!(!region_boxes_cte().contains('$'));
    }

    #[test]
    fn cte_row_count_matches_catalog() {
        let cte = region_boxes_cte();
        assert_eq!(cte.matches("  ('").count(), REGIONS.len());
    }
}
