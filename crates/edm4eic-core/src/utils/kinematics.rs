//! Scalar kinematics on bare Cartesian components.
//!
//! Every function here is total: degenerate vectors never panic or return an error, they produce
//! the IEEE 754 value documented on the function, and NaN components propagate to a NaN result.
//! Magnitudes are computed with [`f64::hypot`], so no finite input overflows or underflows in an
//! intermediate square.
//! Nothing in this module touches shared state, so all of it may be called concurrently.

/// The transverse momentum $`p_T = \sqrt{p_x^2 + p_y^2}`$, the magnitude of the momentum component
/// perpendicular to the beam ($`z`$) axis.
#[inline]
pub fn pt(px: f64, py: f64) -> f64 {
    px.hypot(py)
}

/// The radial distance $`r = \sqrt{x^2 + y^2}`$ of a position from the beam axis.
///
/// This is the same formula as [`pt`] evaluated on position rather than momentum components.
#[inline]
pub fn r(x: f64, y: f64) -> f64 {
    pt(x, y)
}

/// The magnitude of the full momentum $`|\vec{p}| = \sqrt{p_x^2 + p_y^2 + p_z^2}`$.
#[inline]
pub fn p(px: f64, py: f64, pz: f64) -> f64 {
    pt(px, py).hypot(pz)
}

/// The pseudorapidity
/// ```math
/// \eta = -\ln\tan\frac{\theta}{2} = \sinh^{-1}\left(\frac{p_z}{p_T}\right)
/// ```
///
/// # Notes
///
/// Along the beam axis ($`p_T = 0`$) the pseudorapidity diverges. This function returns
/// [`f64::INFINITY`] for $`p_z > 0`$, [`f64::NEG_INFINITY`] for $`p_z < 0`$, and [`f64::NAN`] for
/// the null vector. The result is exactly antisymmetric under $`p_z \to -p_z`$.
#[inline]
pub fn eta(px: f64, py: f64, pz: f64) -> f64 {
    let pt = pt(px, py);
    if pt == 0.0 {
        if pz > 0.0 {
            return f64::INFINITY;
        }
        if pz < 0.0 {
            return f64::NEG_INFINITY;
        }
        return f64::NAN;
    }
    (pz / pt).asinh()
}

/// The cosine of the polar angle, $`\cos\theta = p_z / |\vec{p}|`$.
///
/// The null vector has no direction, so `cos_theta(0.0, 0.0, 0.0)` is [`f64::NAN`].
#[inline]
pub fn cos_theta(px: f64, py: f64, pz: f64) -> f64 {
    pz / p(px, py, pz)
}

/// The polar angle $`\theta = \operatorname{atan2}(p_T, p_z)`$ measured from the $`+z`$ axis, in
/// $`[0, \pi]`$.
#[inline]
pub fn theta(px: f64, py: f64, pz: f64) -> f64 {
    pt(px, py).atan2(pz)
}

/// The azimuthal angle $`\phi = \operatorname{atan2}(p_y, p_x)`$ in $`(-\pi, \pi]`$.
#[inline]
pub fn phi(px: f64, py: f64) -> f64 {
    py.atan2(px)
}

/// Convert a pseudorapidity to the corresponding polar angle, $`\theta = 2\tan^{-1}(e^{-\eta})`$.
#[inline]
pub fn eta_to_angle(eta: f64) -> f64 {
    (-eta).exp().atan() * 2.0
}

/// Convert a polar angle to the corresponding pseudorapidity, $`\eta = -\ln\tan(\theta/2)`$.
#[inline]
pub fn angle_to_eta(theta: f64) -> f64 {
    -(0.5 * theta).tan().ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_transverse_plane_vector() {
        assert_eq!(pt(3.0, 4.0), 5.0);
        assert_eq!(cos_theta(3.0, 4.0, 0.0), 0.0);
        assert_eq!(eta(3.0, 4.0, 0.0), 0.0);
    }

    #[test]
    fn test_beam_axis_vector() {
        assert_eq!(pt(0.0, 0.0), 0.0);
        assert_eq!(cos_theta(0.0, 0.0, 5.0), 1.0);
        assert_eq!(eta(0.0, 0.0, 5.0), f64::INFINITY);
        assert_eq!(eta(0.0, 0.0, -5.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_null_vector() {
        assert_eq!(pt(0.0, 0.0), 0.0);
        assert_eq!(r(0.0, 0.0), 0.0);
        assert!(cos_theta(0.0, 0.0, 0.0).is_nan());
        assert!(eta(0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        assert!(pt(f64::NAN, 1.0).is_nan());
        assert!(r(1.0, f64::NAN).is_nan());
        assert!(eta(1.0, 2.0, f64::NAN).is_nan());
        assert!(eta(0.0, 0.0, f64::NAN).is_nan());
        assert!(cos_theta(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_known_values() {
        assert_relative_eq!(p(1.0, 2.0, 2.0), 3.0);
        assert_relative_eq!(eta(1.0, 0.0, 1.0), (1.0_f64 + 2.0_f64.sqrt()).ln());
        assert_relative_eq!(theta(1.0, 0.0, 1.0), std::f64::consts::FRAC_PI_4);
        assert_relative_eq!(theta(0.0, 0.0, -2.0), std::f64::consts::PI);
        assert_relative_eq!(phi(0.0, 1.0), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(phi(-1.0, 0.0), std::f64::consts::PI);
    }

    #[test]
    fn test_angle_eta_conversions() {
        assert_relative_eq!(angle_to_eta(std::f64::consts::FRAC_PI_2), 0.0, epsilon = 1e-15);
        assert_relative_eq!(eta_to_angle(0.0), std::f64::consts::FRAC_PI_2);
        for &eta_value in &[-3.5, -1.0, 0.25, 2.0, 4.0] {
            assert_relative_eq!(
                angle_to_eta(eta_to_angle(eta_value)),
                eta_value,
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(
            angle_to_eta(theta(0.3, -0.4, 2.5)),
            eta(0.3, -0.4, 2.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_tiny_components() {
        assert_relative_eq!(pt(1e-170, 1e-170), 2.0_f64.sqrt() * 1e-170, max_relative = 1e-12);
        assert_eq!(cos_theta(0.0, 0.0, 1e-170), 1.0);
        assert_eq!(eta(1e-170, 0.0, 0.0), 0.0);
        assert_relative_eq!(eta(1e-170, 0.0, 1e-170), 1.0_f64.asinh(), max_relative = 1e-12);
        assert_relative_eq!(cos_theta(1e-170, 0.0, 1e-170), 0.5_f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_huge_components() {
        assert_relative_eq!(pt(1e200, 1e200), 2.0_f64.sqrt() * 1e200, max_relative = 1e-12);
        assert_relative_eq!(p(1e200, 2e200, 2e200), 3e200, max_relative = 1e-12);
        assert_relative_eq!(cos_theta(1e200, 0.0, 1e200), 0.5_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(eta(1e200, 0.0, 1e200), 1.0_f64.asinh(), max_relative = 1e-12);
        assert_eq!(cos_theta(0.0, 0.0, -1e300), -1.0);
        assert_relative_eq!(
            theta(1e200, 0.0, 1e200),
            std::f64::consts::FRAC_PI_4,
            max_relative = 1e-12
        );
    }

    fn component() -> impl Strategy<Value = f64> {
        -1.0e3..1.0e3
    }

    proptest! {
        #[test]
        fn prop_pt_matches_formula(px in component(), py in component()) {
            let value = pt(px, py);
            let expected = (px * px + py * py).sqrt();
            prop_assert!((value - expected).abs() <= 1e-12 * expected.max(1.0));
            prop_assert!(value >= 0.0);
        }

        #[test]
        fn prop_r_is_pt(x in component(), y in component()) {
            prop_assert_eq!(r(x, y), pt(x, y));
        }

        #[test]
        fn prop_cos_theta_bounded(px in component(), py in component(), pz in component()) {
            let mag = (px * px + py * py + pz * pz).sqrt();
            prop_assume!(mag > 1e-6);
            let value = cos_theta(px, py, pz);
            prop_assert!((value - pz / mag).abs() < 1e-12);
            prop_assert!((-1.0..=1.0).contains(&value));
        }

        #[test]
        fn prop_eta_cosh_identity(px in component(), py in component(), pz in component()) {
            let transverse = pt(px, py);
            prop_assume!(transverse > 1e-6);
            let value = eta(px, py, pz);
            prop_assert!(value.is_finite());
            let expected = p(px, py, pz) / transverse;
            prop_assert!(((value.cosh() - expected) / expected).abs() < 1e-9);
        }

        #[test]
        fn prop_direction_is_scale_invariant(
            px in component(),
            py in component(),
            pz in component(),
            exponent in -150i32..150,
        ) {
            prop_assume!(pt(px, py) > 1e-3);
            let scale = 10.0_f64.powi(exponent);
            let (sx, sy, sz) = (px * scale, py * scale, pz * scale);
            let cos_value = cos_theta(sx, sy, sz);
            prop_assert!((-1.0..=1.0).contains(&cos_value));
            prop_assert!((cos_value - cos_theta(px, py, pz)).abs() < 1e-12);
            prop_assert!((eta(sx, sy, sz) - eta(px, py, pz)).abs() < 1e-9);
            prop_assert!(pt(sx, sy).is_finite() && pt(sx, sy) > 0.0);
        }

        #[test]
        fn prop_eta_antisymmetric(px in component(), py in component(), pz in component()) {
            let forward = eta(px, py, pz);
            let backward = eta(px, py, -pz);
            if forward.is_nan() {
                prop_assert!(backward.is_nan());
            } else {
                prop_assert_eq!(forward, -backward);
            }
        }
    }
}
