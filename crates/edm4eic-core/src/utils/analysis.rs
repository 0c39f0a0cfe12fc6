use crate::{
    data::TrackParameters,
    utils::vectors::{Vec3, Vec4},
};

/// Below this magnitude of $`q/p`$ a track is treated as having no usable momentum.
pub const MIN_Q_OVER_P: f64 = 1.0e-9;

/// Reconstruct the 3-momentum of a track from its fitted parameters.
///
/// The momentum magnitude is $`|1 / (q/p)|`$ and the direction is given by the polar and azimuthal
/// angles. Tracks with $`|q/p| < 10^{-9}`$ yield the null vector.
pub fn track_momentum(track: &TrackParameters) -> Vec3 {
    if track.q_over_p.abs() < MIN_Q_OVER_P {
        return Vec3::default();
    }
    let p = (1.0 / track.q_over_p).abs();
    Vec3::from_spherical(p, track.theta, track.phi)
}

/// Reconstruct the four-momenta of a collection of tracks under a mass hypothesis, in track
/// order. Tracks without usable momentum give the zero four-vector.
pub fn momenta_from_tracking(tracks: &[TrackParameters], mass: f64) -> Vec<Vec4> {
    tracks
        .iter()
        .map(|track| {
            if track.q_over_p.abs() < MIN_Q_OVER_P {
                Vec4::default()
            } else {
                track_momentum(track).with_mass(mass)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_momenta_from_tracking() {
        let tracks = [
            TrackParameters {
                theta: FRAC_PI_2,
                phi: 0.0,
                q_over_p: -0.5,
                time: 0.0,
            },
            TrackParameters {
                theta: FRAC_PI_4,
                phi: FRAC_PI_2,
                q_over_p: 0.25,
                time: 1.0,
            },
            TrackParameters {
                theta: 1.0,
                phi: 1.0,
                q_over_p: 1.0e-12,
                time: 0.0,
            },
        ];
        let pion_mass = 0.13957;
        let momenta = momenta_from_tracking(&tracks, pion_mass);
        assert_eq!(momenta.len(), 3);
        assert_relative_eq!(momenta[0].px(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(momenta[0].py(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(momenta[0].pz(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(momenta[0].m(), pion_mass, epsilon = 1e-12);
        let second = momenta[1].vec3();
        assert_relative_eq!(second.mag(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(second.theta(), FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(second.phi(), FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(momenta[2], Vec4::default());
        assert_eq!(track_momentum(&tracks[2]), Vec3::default());
    }
}
