//! Transposition of horizontal irradiance onto tilted planes.

use derive_more::Add;
use solgrid_quantities::WattsPerSquareMeter;

/// Plane-of-array irradiance split into its components.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Add)]
pub struct PlaneOfArray {
    pub direct: WattsPerSquareMeter,
    pub sky_diffuse: WattsPerSquareMeter,
    pub ground_reflected: WattsPerSquareMeter,
}

impl PlaneOfArray {
    pub fn global(&self) -> WattsPerSquareMeter {
        self.direct + self.sky_diffuse + self.ground_reflected
    }
}

/// Cosine of the angle between the sun's rays and the surface normal.
///
/// The spherical law of cosines, clamped to `-1..=1` against rounding.
#[must_use]
pub fn incidence_cosine(
    zenith_deg: f64,
    sun_azimuth_deg: f64,
    tilt_deg: f64,
    surface_azimuth_deg: f64,
) -> f64 {
    let zenith = zenith_deg.to_radians();
    let tilt = tilt_deg.to_radians();
    (zenith.cos() * tilt.cos()
        + zenith.sin() * tilt.sin() * (sun_azimuth_deg - surface_azimuth_deg).to_radians().cos())
    .clamp(-1.0, 1.0)
}

/// Angle of incidence in degrees, limited to the front hemisphere `0..=90`.
#[must_use]
pub fn angle_of_incidence_deg(
    zenith_deg: f64,
    sun_azimuth_deg: f64,
    tilt_deg: f64,
    surface_azimuth_deg: f64,
) -> f64 {
    incidence_cosine(zenith_deg, sun_azimuth_deg, tilt_deg, surface_azimuth_deg)
        .acos()
        .to_degrees()
        .clamp(0.0, 90.0)
}

/// Isotropic sky: the fraction of the sky dome seen by the tilted plane.
pub fn isotropic_sky_diffuse(dhi: WattsPerSquareMeter, tilt_deg: f64) -> WattsPerSquareMeter {
    dhi * (1.0 + tilt_deg.to_radians().cos()) / 2.0
}

/// Reflectance is clamped to `0..=1`, so the component is never negative.
pub fn ground_reflected(
    ghi: WattsPerSquareMeter,
    albedo: f64,
    tilt_deg: f64,
) -> WattsPerSquareMeter {
    ghi.non_negative() * albedo.clamp(0.0, 1.0) * (1.0 - tilt_deg.to_radians().cos()) / 2.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_normal_incidence() {
        assert_abs_diff_eq!(incidence_cosine(0.0, 180.0, 0.0, 180.0), 1.0);
        assert_abs_diff_eq!(angle_of_incidence_deg(30.0, 180.0, 30.0, 180.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sun_behind_the_plane() {
        // Sun low in the north, plane steeply facing south:
        assert!(incidence_cosine(80.0, 0.0, 60.0, 180.0) < 0.0);
        assert_abs_diff_eq!(angle_of_incidence_deg(80.0, 0.0, 60.0, 180.0), 90.0);
    }

    #[test]
    fn test_horizontal_plane() {
        assert_abs_diff_eq!(incidence_cosine(60.0, 42.0, 0.0, 300.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(isotropic_sky_diffuse(WattsPerSquareMeter(200.0), 0.0).0, 200.0);
        assert_abs_diff_eq!(ground_reflected(WattsPerSquareMeter(800.0), 0.2, 0.0).0, 0.0);
    }

    #[test]
    fn test_vertical_plane() {
        assert_abs_diff_eq!(isotropic_sky_diffuse(WattsPerSquareMeter(200.0), 90.0).0, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ground_reflected(WattsPerSquareMeter(800.0), 0.2, 90.0).0, 80.0, epsilon = 1e-9);
    }
}
