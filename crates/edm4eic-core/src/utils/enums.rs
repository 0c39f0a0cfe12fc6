use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{utils::kinematics, Edm4eicError, Vec3};

/// Namespace under which the kinematics functions are registered with a dataframe engine.
pub const NAMESPACE: &str = "edm4eic::utils";

/// The record component a [`Kinematic`] reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// The 3-momentum $`(p_x, p_y, p_z)`$ of a particle or hit.
    Momentum,
    /// The 3-position $`(x, y, z)`$ of a hit or vertex.
    Position,
}
impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Momentum => write!(f, "momentum"),
            Input::Position => write!(f, "position"),
        }
    }
}

/// The registered per-record kinematics functions.
///
/// Each variant maps one 3-vector to one scalar. [`Kinematic::Pt`], [`Kinematic::Eta`],
/// [`Kinematic::CosTheta`] and [`Kinematic::R`] are the functions a dataframe engine addresses as
/// `edm4eic::utils::pt` and so on. The remaining variants expose the other scalar helpers of
/// [`kinematics`] under the same namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kinematic {
    /// Transverse momentum, see [`kinematics::pt`].
    Pt,
    /// Pseudorapidity, see [`kinematics::eta`].
    Eta,
    /// Cosine of the polar angle, see [`kinematics::cos_theta`].
    CosTheta,
    /// Radial distance from the beam axis, see [`kinematics::r`].
    R,
    /// Total momentum, see [`kinematics::p`].
    P,
    /// Polar angle, see [`kinematics::theta`].
    Theta,
    /// Azimuthal angle, see [`kinematics::phi`].
    Phi,
}

impl Kinematic {
    /// Every registered function, in registration order.
    pub const ALL: [Kinematic; 7] = [
        Kinematic::Pt,
        Kinematic::Eta,
        Kinematic::CosTheta,
        Kinematic::R,
        Kinematic::P,
        Kinematic::Theta,
        Kinematic::Phi,
    ];

    /// The unqualified function name, like `cos_theta`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Kinematic::Pt => "pt",
            Kinematic::Eta => "eta",
            Kinematic::CosTheta => "cos_theta",
            Kinematic::R => "r",
            Kinematic::P => "p",
            Kinematic::Theta => "theta",
            Kinematic::Phi => "phi",
        }
    }

    /// The fully qualified function name, like `edm4eic::utils::cos_theta`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", NAMESPACE, self.short_name())
    }

    /// The record component this function consumes.
    pub fn input(&self) -> Input {
        match self {
            Kinematic::R => Input::Position,
            _ => Input::Momentum,
        }
    }

    /// Evaluate the function on a single 3-vector.
    #[inline]
    pub fn apply(&self, v: Vec3) -> f64 {
        match self {
            Kinematic::Pt => kinematics::pt(v.x, v.y),
            Kinematic::Eta => kinematics::eta(v.x, v.y, v.z),
            Kinematic::CosTheta => kinematics::cos_theta(v.x, v.y, v.z),
            Kinematic::R => kinematics::r(v.x, v.y),
            Kinematic::P => kinematics::p(v.x, v.y, v.z),
            Kinematic::Theta => kinematics::theta(v.x, v.y, v.z),
            Kinematic::Phi => kinematics::phi(v.x, v.y),
        }
    }
}

impl Display for Kinematic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// Names are case-sensitive. Each function is accepted by its short name, optionally qualified
/// with `edm4eic::utils::`. `cosTheta` is accepted as an alias of `cos_theta`.
impl FromStr for Kinematic {
    type Err = Edm4eicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let short = trimmed
            .strip_prefix(NAMESPACE)
            .and_then(|rest| rest.strip_prefix("::"))
            .unwrap_or(trimmed);
        match short {
            "pt" => Ok(Self::Pt),
            "eta" => Ok(Self::Eta),
            "cos_theta" | "cosTheta" => Ok(Self::CosTheta),
            "r" => Ok(Self::R),
            "p" => Ok(Self::P),
            "theta" => Ok(Self::Theta),
            "phi" => Ok(Self::Phi),
            _ => Err(Edm4eicError::ParseError {
                name: s.to_string(),
                object: "Kinematic".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_and_short_names() {
        assert_eq!(
            Kinematic::from_str("edm4eic::utils::pt").unwrap(),
            Kinematic::Pt
        );
        assert_eq!(Kinematic::from_str("eta").unwrap(), Kinematic::Eta);
        assert_eq!(
            Kinematic::from_str("cosTheta").unwrap(),
            Kinematic::CosTheta
        );
        assert_eq!(
            Kinematic::from_str("edm4eic::utils::cos_theta").unwrap(),
            Kinematic::CosTheta
        );
        assert_eq!(Kinematic::from_str(" r ").unwrap(), Kinematic::R);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        for name in ["PT", "Eta", "Cos_Theta", "COSTHETA", "costheta", "utils::eta"] {
            assert!(
                matches!(
                    Kinematic::from_str(name),
                    Err(Edm4eicError::ParseError { .. })
                ),
                "{name} should not parse"
            );
        }
        assert!(Kinematic::from_str("edm4eic::utilspt").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = Kinematic::from_str("edm4eic::utils::rapidity").unwrap_err();
        assert!(matches!(err, Edm4eicError::ParseError { .. }));
        assert!(Kinematic::from_str("edm4hep::utils::pt").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kinematic in Kinematic::ALL {
            let name = kinematic.to_string();
            assert!(name.starts_with("edm4eic::utils::"));
            assert_eq!(Kinematic::from_str(&name).unwrap(), kinematic);
        }
    }

    #[test]
    fn test_signatures() {
        assert_eq!(Kinematic::Pt.input(), Input::Momentum);
        assert_eq!(Kinematic::Eta.input(), Input::Momentum);
        assert_eq!(Kinematic::CosTheta.input(), Input::Momentum);
        assert_eq!(Kinematic::R.input(), Input::Position);
    }

    #[test]
    fn test_apply_matches_scalar_functions() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(Kinematic::Pt.apply(v), 5.0);
        assert_eq!(Kinematic::R.apply(v), 5.0);
        assert_eq!(Kinematic::Eta.apply(v), 0.0);
        assert_eq!(Kinematic::CosTheta.apply(v), 0.0);
        assert_eq!(Kinematic::P.apply(v), 5.0);
        let beam = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!(Kinematic::Eta.apply(beam), f64::INFINITY);
        assert_eq!(Kinematic::CosTheta.apply(beam), 1.0);
        assert_eq!(Kinematic::Theta.apply(beam), 0.0);
    }
}
