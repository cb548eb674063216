//! Geodetic (lon, lat, height) to geocentric Cartesian conversion on a
//! triaxial ellipsoid, per spec §4.B. Grounded algebraically on
//! `cartographicToCartesian` in `original_source/src/terrainGenerator.cc`.

use serde_derive::{Deserialize, Serialize};

/// Three positive radii sharing a unit with output Cartesian
/// coordinates. `(1, 1, 1)` is the unit sphere special case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Ellipsoid {
    pub const fn new(rx: f64, ry: f64, rz: f64) -> Self {
        Self { rx, ry, rz }
    }

    pub fn max_radius(&self) -> f64 {
        self.rx.max(self.ry).max(self.rz)
    }

    pub fn is_positive(&self) -> bool {
        self.rx > 0.0 && self.ry > 0.0 && self.rz > 0.0
    }
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Map a geodetic point to its Cartesian position and outward unit
/// surface normal on `ellipsoid`. `height` is measured along the
/// ellipsoid normal from the surface.
pub fn cartographic_to_cartesian(
    longitude: f64,
    latitude: f64,
    height: f64,
    ellipsoid: &Ellipsoid,
) -> ([f64; 3], [f64; 3]) {
    let cos_lat = latitude.cos();
    let normal = normalize([
        cos_lat * longitude.cos(),
        cos_lat * longitude.sin(),
        latitude.sin(),
    ]);

    let k = [
        normal[0] * ellipsoid.rx * ellipsoid.rx,
        normal[1] * ellipsoid.ry * ellipsoid.ry,
        normal[2] * ellipsoid.rz * ellipsoid.rz,
    ];
    let gamma_sq = normal[0] * k[0] + normal[1] * k[1] + normal[2] * k[2];
    debug_assert!(
        gamma_sq > 0.0,
        "negative or zero value under the ellipsoid map's square root is a programming error"
    );
    let gamma = gamma_sq.sqrt();
    let kept = [k[0] / gamma, k[1] / gamma, k[2] / gamma];

    let position = [
        normal[0] * height + kept[0],
        normal[1] * height + kept[1],
        normal[2] * height + kept[2],
    ];

    (position, normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_sphere_surface_point_has_unit_length() {
        let ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
        let (pos, _normal) = cartographic_to_cartesian(0.3, 0.6, 0.0, &ellipsoid);
        let len = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-12, "got {len}");
    }

    #[test]
    fn normal_is_unit_length() {
        let ellipsoid = Ellipsoid::new(2.0, 3.0, 1.5);
        let (_pos, normal) = cartographic_to_cartesian(1.1, -0.4, 5.0, &ellipsoid);
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-12, "got {len}");
    }

    #[test]
    fn height_offsets_along_the_normal() {
        let ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
        let (p0, n) = cartographic_to_cartesian(0.2, 0.5, 0.0, &ellipsoid);
        let (p1, _) = cartographic_to_cartesian(0.2, 0.5, 10.0, &ellipsoid);
        for i in 0..3 {
            assert!((p1[i] - p0[i] - 10.0 * n[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn equator_prime_meridian_is_on_the_x_axis() {
        let ellipsoid = Ellipsoid::new(6378137.0, 6378137.0, 6356752.0);
        let (pos, _normal) = cartographic_to_cartesian(0.0, 0.0, 0.0, &ellipsoid);
        assert!((pos[0] - ellipsoid.rx).abs() < 1e-6);
        assert!(pos[1].abs() < 1e-6);
        assert!(pos[2].abs() < 1e-6);
    }
}
