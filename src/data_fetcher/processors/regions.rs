use crate::data_fetcher::models::{Coordinate, Region};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Region whose reference point is nearest. Ties go to Ubud.
pub fn nearest_region(coordinate: Coordinate) -> Region {
    let mut best = Region::Ubud;
    let mut best_distance = f64::INFINITY;
    for region in Region::ALL {
        let distance = haversine_km(coordinate, region.reference_point());
        if distance < best_distance {
            best = region;
            best_distance = distance;
        }
    }
    best
}

/// Decides the single region a club is listed under.
///
/// With a coordinate the nearest region wins. Without one the club stays in
/// the first region whose search returned it, so it is never listed twice.
pub fn assign_region(coordinate: Option<Coordinate>, returned_by: &[Region]) -> Option<Region> {
    match coordinate {
        Some(coordinate) => Some(nearest_region(coordinate)),
        None => returned_by.first().copied(),
    }
}
