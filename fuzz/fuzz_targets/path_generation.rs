#![no_main]

use geofence_navigator::config::default_zone_registry;
use geofence_navigator::rng::SeededRng;
use geofence_navigator::{generate, GeoPoint, NavError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz generation parameters; must either succeed cleanly or fail explicitly
    if data.len() < 12 {
        return;
    }
    let seed = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let segments = u16::from_le_bytes([data[8], data[9]]) % 64;
    let step = (u16::from_le_bytes([data[10], data[11]]) as f64 + 1.0) / 65536.0;

    let zones = default_zone_registry().unwrap();
    let start = GeoPoint::new(13.0837, 80.2707);
    match generate(start, &zones, segments, step, &mut SeededRng::new(seed)) {
        Ok(path) => {
            assert_eq!(path.len(), segments as usize + 1);
            assert!(path.waypoints()[1..].iter().all(|p| !zones.is_restricted(p)));
        }
        Err(NavError::NoFeasiblePath { .. }) => {}
        Err(e) => panic!("unexpected error: {}", e),
    }
});
