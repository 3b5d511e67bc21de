use serde::{Deserialize, Serialize};

// One cell spans 0.01 degrees, roughly one kilometre at Czech latitudes.
const CELLS_PER_DEGREE: f64 = 100.0;

const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
	pub lat: f64,
	pub lng: f64,
}

/// Quantized coordinate used as part of a cache key, so nearby queries share
/// cached results. A query without an origin maps to the `Unknown` sentinel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LocationBucket {
	Unknown,
	Cell { lat: i32, lng: i32 },
}

pub fn bucket(origin: Option<GeoPoint>) -> LocationBucket {
	match origin {
		Some(point) => LocationBucket::Cell {
			lat: (point.lat * CELLS_PER_DEGREE).round() as i32,
			lng: (point.lng * CELLS_PER_DEGREE).round() as i32,
		},
		None => LocationBucket::Unknown,
	}
}

/// Great-circle distance between two points.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
	let lat_a = a.lat.to_radians();
	let lat_b = b.lat.to_radians();
	let d_lat = (b.lat - a.lat).to_radians();
	let d_lng = (b.lng - a.lng).to_radians();
	let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nearby_points_share_a_bucket() {
		let a = bucket(Some(GeoPoint { lat: 50.0871, lng: 14.4213 }));
		let b = bucket(Some(GeoPoint { lat: 50.0874, lng: 14.4208 }));

		assert_eq!(a, b);
	}

	#[test]
	fn missing_origin_maps_to_sentinel() {
		assert_eq!(bucket(None), LocationBucket::Unknown);
	}

	#[test]
	fn haversine_matches_known_distance() {
		let prague = GeoPoint { lat: 50.0755, lng: 14.4378 };
		let brno = GeoPoint { lat: 49.1951, lng: 16.6068 };
		let distance = haversine_km(prague, brno);

		assert!((distance - 184.0).abs() < 3.0);
	}
}
