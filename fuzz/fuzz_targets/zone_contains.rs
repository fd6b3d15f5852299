#![no_main]

use geofence_navigator::geofence::{contains, Zone};
use geofence_navigator::GeoPoint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz zone decoding and the containment test
    if let Ok((zone, point)) = postcard::from_bytes::<(Zone, GeoPoint)>(data) {
        assert!(zone.vertices().len() >= 3);
        assert!(zone.vertices().iter().all(|v| v.is_finite()));

        let first = zone.contains(&point);
        assert_eq!(zone.contains(&point), first);

        // Bounding-box precheck must never change the answer
        assert_eq!(contains(&point, zone.vertices()), first);
    }
});
