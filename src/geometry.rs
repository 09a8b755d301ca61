//! Spherical and planar geometry helpers.
//!
//! - Great-circle distance and destination point on a spherical Earth
//! - Polygon centroid for label placement on country outlines
//! - Normalized intensity to heatmap color

use bevy::prelude::*;

use crate::types::{DEG_TO_RAD, EARTH_RADIUS_KM, GeoCoord, RAD_TO_DEG};

/// Heatmap gradient stops: (t, r, g, b, a).
const HEAT_STOPS: [(f32, f32, f32, f32, f32); 5] = [
    (0.0, 0.0, 0.2, 1.0, 0.0),
    (0.25, 0.0, 0.8, 1.0, 0.35),
    (0.5, 0.2, 1.0, 0.2, 0.55),
    (0.75, 1.0, 0.85, 0.0, 0.75),
    (1.0, 1.0, 0.1, 0.0, 0.9),
];

/// Great-circle distance between two coordinates in kilometers (haversine).
pub fn haversine_km(a: GeoCoord, b: GeoCoord) -> f64 {
    let lat1 = a.lat * DEG_TO_RAD;
    let lat2 = b.lat * DEG_TO_RAD;
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng) * DEG_TO_RAD;

    let h = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// Point reached by travelling `distance_km` from `origin` along `bearing_rad`
/// (clockwise from north).
pub fn destination(origin: GeoCoord, bearing_rad: f64, distance_km: f64) -> GeoCoord {
    let lat1 = origin.lat * DEG_TO_RAD;
    let lng1 = origin.lng * DEG_TO_RAD;
    let delta = distance_km / EARTH_RADIUS_KM;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lng2 = lng1
        + (bearing_rad.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    GeoCoord::new(lat2 * RAD_TO_DEG, wrap_longitude(lng2 * RAD_TO_DEG))
}

/// Wrap a longitude in degrees into [-180, 180].
pub fn wrap_longitude(lng: f64) -> f64 {
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the caller's sign at the seam
    if wrapped == -180.0 && lng > 0.0 { 180.0 } else { wrapped }
}

/// Representative point of a closed `[lng, lat]` ring.
///
/// Uses the planar area-weighted centroid. Degenerate rings (collinear or
/// repeated points) fall back to the vertex mean. Returns `None` for an
/// empty ring.
pub fn polygon_centroid(ring: &[[f64; 2]]) -> Option<GeoCoord> {
    if ring.is_empty() {
        return None;
    }

    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        let cross = p[0] * q[1] - q[0] * p[1];
        twice_area += cross;
        cx += (p[0] + q[0]) * cross;
        cy += (p[1] + q[1]) * cross;
    }

    if twice_area.abs() < 1e-12 {
        let n = ring.len() as f64;
        let (sx, sy) = ring
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        return Some(GeoCoord::new(sy / n, sx / n));
    }

    let scale = 1.0 / (3.0 * twice_area);
    Some(GeoCoord::new(cy * scale, cx * scale))
}

/// Absolute planar area of a `[lng, lat]` ring in square degrees.
pub fn ring_area(ring: &[[f64; 2]]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = ring
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let q = ring[(i + 1) % ring.len()];
            p[0] * q[1] - q[0] * p[1]
        })
        .sum();
    twice_area.abs() * 0.5
}

/// Map a normalized intensity to a heatmap color.
///
/// Input is clamped to [0, 1]. Low intensities are transparent blue, high
/// intensities opaque red.
pub fn intensity_color(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };

    for pair in HEAT_STOPS.windows(2) {
        let (t0, r0, g0, b0, a0) = pair[0];
        let (t1, r1, g1, b1, a1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            return Color::srgba(
                r0 + (r1 - r0) * f,
                g0 + (g1 - g0) * f,
                b0 + (b1 - b0) * f,
                a0 + (a1 - a0) * f,
            );
        }
    }

    let (_, r, g, b, a) = HEAT_STOPS[HEAT_STOPS.len() - 1];
    Color::srgba(r, g, b, a)
}
