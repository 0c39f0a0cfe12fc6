//! Unit constants for quantities stored in EDM4eic records.
//!
//! Lengths are stored in centimeters, times in nanoseconds and energies in GeV, so each base unit
//! is `1.0`. Multiply a value by a constant to express it in the stored unit, divide to convert a
//! stored value out of it:
//!
//! ```
//! use edm4eic_core::utils::units::{GEV, MEV, MM};
//!
//! let e_dep = 250.0 * MEV;
//! assert!((e_dep / GEV - 0.25).abs() < 1e-12);
//! assert_eq!(10.0 * MM, 1.0);
//! ```

// Length
pub const CM: f64 = 1.0;
pub const MM: f64 = 0.1 * CM;
pub const UM: f64 = 1.0e-4 * CM;
pub const NM: f64 = 1.0e-7 * CM;
pub const M: f64 = 100.0 * CM;

// Time
pub const NS: f64 = 1.0;
pub const PS: f64 = 1.0e-3 * NS;
pub const US: f64 = 1.0e3 * NS;
pub const MS: f64 = 1.0e6 * NS;
pub const S: f64 = 1.0e9 * NS;

// Energy
pub const GEV: f64 = 1.0;
pub const MEV: f64 = 1.0e-3 * GEV;
pub const KEV: f64 = 1.0e-6 * GEV;
pub const EV: f64 = 1.0e-9 * GEV;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_units() {
        assert_eq!(CM, 1.0);
        assert_eq!(NS, 1.0);
        assert_eq!(GEV, 1.0);
    }

    #[test]
    fn test_conversions() {
        assert_relative_eq!(10.0 * MM, CM);
        assert_relative_eq!(1.0 * M, 1000.0 * MM);
        assert_relative_eq!(1.0e4 * UM, CM);
        assert_relative_eq!(1.0e3 * NM, UM);
        assert_relative_eq!(1.0e3 * PS, NS);
        assert_relative_eq!(1.0e3 * MS, S);
        assert_relative_eq!(1.0e3 * US, MS);
        assert_relative_eq!(1.0e3 * MEV, GEV);
        assert_relative_eq!(1.0e3 * EV, KEV);
    }
}
