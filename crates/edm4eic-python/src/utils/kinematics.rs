use edm4eic_core::{runtime, utils::kinematics, Edm4eicError, Edm4eicResult};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

fn check_lengths(lengths: &[usize]) -> Edm4eicResult<usize> {
    let expected = lengths.first().copied().unwrap_or_default();
    if let Some(&actual) = lengths.iter().find(|&&len| len != expected) {
        return Err(Edm4eicError::LengthMismatch {
            context: "Input arrays".to_string(),
            expected,
            actual,
        });
    }
    Ok(expected)
}

fn apply2<A, B>(a: A, b: B, f: fn(f64, f64) -> f64) -> Edm4eicResult<Vec<f64>>
where
    A: ExactSizeIterator<Item = f64>,
    B: ExactSizeIterator<Item = f64>,
{
    check_lengths(&[a.len(), b.len()])?;
    Ok(a.zip(b).map(|(a, b)| f(a, b)).collect())
}

fn apply3<A, B, C>(a: A, b: B, c: C, f: fn(f64, f64, f64) -> f64) -> Edm4eicResult<Vec<f64>>
where
    A: ExactSizeIterator<Item = f64>,
    B: ExactSizeIterator<Item = f64>,
    C: ExactSizeIterator<Item = f64>,
{
    check_lengths(&[a.len(), b.len(), c.len()])?;
    Ok(a.zip(b).zip(c).map(|((a, b), c)| f(a, b, c)).collect())
}

fn map2<'py>(
    py: Python<'py>,
    a: PyReadonlyArray1<'py, f64>,
    b: PyReadonlyArray1<'py, f64>,
    f: fn(f64, f64) -> f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    runtime::ensure_usable()?;
    let (a, b) = (a.as_array(), b.as_array());
    let values = apply2(a.iter().copied(), b.iter().copied(), f)?;
    Ok(PyArray1::from_vec(py, values))
}

fn map3<'py>(
    py: Python<'py>,
    a: PyReadonlyArray1<'py, f64>,
    b: PyReadonlyArray1<'py, f64>,
    c: PyReadonlyArray1<'py, f64>,
    f: fn(f64, f64, f64) -> f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    runtime::ensure_usable()?;
    let (a, b, c) = (a.as_array(), b.as_array(), c.as_array());
    let values = apply3(a.iter().copied(), b.iter().copied(), c.iter().copied(), f)?;
    Ok(PyArray1::from_vec(py, values))
}

/// The transverse momentum, ``sqrt(px**2 + py**2)``
///
/// Parameters
/// ----------
/// px, py : float
///     Cartesian momentum components in GeV
///
/// Returns
/// -------
/// float
///
/// Raises
/// ------
/// ImportError
///     If ``init`` has failed in this process
///
#[pyfunction]
pub fn pt(px: f64, py: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::pt(px, py))
}

/// The pseudorapidity
///
/// Returns ``inf`` or ``-inf`` along the beam axis and ``nan`` for the null vector.
///
/// Parameters
/// ----------
/// px, py, pz : float
///     Cartesian momentum components
///
/// Returns
/// -------
/// float
///
#[pyfunction]
pub fn eta(px: f64, py: f64, pz: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::eta(px, py, pz))
}

/// The cosine of the polar angle, ``pz / |p|``
///
/// Returns ``nan`` for the null vector.
///
/// Parameters
/// ----------
/// px, py, pz : float
///     Cartesian momentum components
///
/// Returns
/// -------
/// float
///
#[pyfunction]
pub fn cos_theta(px: f64, py: f64, pz: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::cos_theta(px, py, pz))
}

/// The radial distance from the beam axis, ``sqrt(x**2 + y**2)``
///
/// Parameters
/// ----------
/// x, y : float
///     Cartesian position components in cm
///
/// Returns
/// -------
/// float
///
#[pyfunction]
pub fn r(x: f64, y: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::r(x, y))
}

/// The momentum magnitude
#[pyfunction]
pub fn p(px: f64, py: f64, pz: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::p(px, py, pz))
}

/// The polar angle in radians
#[pyfunction]
pub fn theta(px: f64, py: f64, pz: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::theta(px, py, pz))
}

/// The azimuthal angle in radians
#[pyfunction]
pub fn phi(px: f64, py: f64) -> PyResult<f64> {
    runtime::ensure_usable()?;
    Ok(kinematics::phi(px, py))
}

/// Element-wise ``pt`` over arrays of equal length
///
/// Raises
/// ------
/// ValueError
///     If the arrays differ in length
/// ImportError
///     If ``init`` has failed in this process
///
#[pyfunction]
pub fn pt_array<'py>(
    gil: Python<'py>,
    px: PyReadonlyArray1<'py, f64>,
    py: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    map2(gil, px, py, kinematics::pt)
}

/// Element-wise ``eta`` over arrays of equal length
#[pyfunction]
pub fn eta_array<'py>(
    gil: Python<'py>,
    px: PyReadonlyArray1<'py, f64>,
    py: PyReadonlyArray1<'py, f64>,
    pz: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    map3(gil, px, py, pz, kinematics::eta)
}

/// Element-wise ``cos_theta`` over arrays of equal length
#[pyfunction]
pub fn cos_theta_array<'py>(
    gil: Python<'py>,
    px: PyReadonlyArray1<'py, f64>,
    py: PyReadonlyArray1<'py, f64>,
    pz: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    map3(gil, px, py, pz, kinematics::cos_theta)
}

/// Element-wise ``r`` over arrays of equal length
#[pyfunction]
pub fn r_array<'py>(
    gil: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    map2(gil, x, y, kinematics::r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_check_lengths() {
        assert_eq!(check_lengths(&[]).unwrap(), 0);
        assert_eq!(check_lengths(&[4]).unwrap(), 4);
        assert_eq!(check_lengths(&[3, 3, 3]).unwrap(), 3);
        assert!(matches!(
            check_lengths(&[3, 3, 2]),
            Err(Edm4eicError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert!(matches!(
            check_lengths(&[0, 1]),
            Err(Edm4eicError::LengthMismatch {
                expected: 0,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_apply_matches_scalar() {
        let px = [3.0, 0.0, -1.0, 1e200];
        let py = [4.0, 0.0, 2.0, 1e200];
        let pz = [0.0, 5.0, -3.0, 0.0];
        let pts = apply2(px.into_iter(), py.into_iter(), kinematics::pt).unwrap();
        let etas = apply3(
            px.into_iter(),
            py.into_iter(),
            pz.into_iter(),
            kinematics::eta,
        )
        .unwrap();
        for i in 0..px.len() {
            assert_relative_eq!(pts[i], kinematics::pt(px[i], py[i]));
        }
        assert_eq!(pts[0], 5.0);
        assert!(pts[3].is_finite());
        assert_eq!(etas[1], f64::INFINITY);
        assert_relative_eq!(etas[2], kinematics::eta(-1.0, 2.0, -3.0));
        let cos = apply3(
            px.into_iter(),
            py.into_iter(),
            pz.into_iter(),
            kinematics::cos_theta,
        )
        .unwrap();
        assert_eq!(cos[1], 1.0);
        assert_eq!(cos[0], 0.0);
    }

    #[test]
    fn test_apply_empty() {
        let empty: [f64; 0] = [];
        assert!(apply2(empty.into_iter(), empty.into_iter(), kinematics::r)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_apply_rejects_mismatched_lengths() {
        let result = apply2([1.0, 2.0].into_iter(), [1.0].into_iter(), kinematics::r);
        assert!(matches!(
            result,
            Err(Edm4eicError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        let result = apply3(
            [1.0].into_iter(),
            [1.0].into_iter(),
            [1.0, 2.0, 3.0].into_iter(),
            kinematics::cos_theta,
        );
        assert!(matches!(
            result,
            Err(Edm4eicError::LengthMismatch {
                expected: 1,
                actual: 3,
                ..
            })
        ));
    }
}
