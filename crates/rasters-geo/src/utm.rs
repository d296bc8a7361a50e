//! Local UTM zone lookup

use rasters_core::Crs;

/// UTM zone number (1..=60) containing a longitude
pub fn utm_zone(lon: f64) -> u8 {
    (((lon + 180.0) / 6.0).floor() as i64).rem_euclid(60) as u8 + 1
}

/// PROJ string for the WGS 84 UTM zone containing a location
pub fn local_utm_proj4_from_lat_lon(lat: f64, lon: f64) -> String {
    local_utm_crs(lat, lon).to_string()
}

/// UTM CRS for a location, southern hemisphere when latitude is negative
pub fn local_utm_crs(lat: f64, lon: f64) -> Crs {
    Crs::utm(utm_zone(lon), lat < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_zones() {
        assert_eq!(utm_zone(-122.42), 10); // San Francisco
        assert_eq!(utm_zone(115.26), 50); // Bali
        assert_eq!(utm_zone(2.35), 31); // Paris
        assert_eq!(utm_zone(-180.0), 1);
        assert_eq!(utm_zone(180.0), 1);
    }

    #[test]
    fn test_hemisphere() {
        assert_eq!(
            local_utm_proj4_from_lat_lon(37.77, -122.42),
            "+proj=utm +zone=10 +ellps=WGS84 +datum=WGS84 +units=m +no_defs"
        );
        assert_eq!(
            local_utm_proj4_from_lat_lon(-8.5, 115.26),
            "+proj=utm +zone=50 +south +ellps=WGS84 +datum=WGS84 +units=m +no_defs"
        );
    }

    proptest! {
        #[test]
        fn zone_is_always_in_range(lon in -180.0f64..=180.0) {
            let zone = utm_zone(lon);
            prop_assert!((1..=60).contains(&zone));
        }

        #[test]
        fn zone_central_meridian_is_within_three_degrees(lon in -180.0f64..180.0) {
            let zone = utm_zone(lon) as f64;
            let central_meridian = zone * 6.0 - 183.0;
            prop_assert!((lon - central_meridian).abs() <= 3.0 + 1e-9);
        }
    }
}
