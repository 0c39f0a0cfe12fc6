use edm4eic_core::{Vec3, Vec4};
use numpy::PyArray1;
use pyo3::{exceptions::PyTypeError, prelude::*};

/// A 3-vector formed from Cartesian components
///
/// Parameters
/// ----------
/// x, y, z : float
///     The Cartesian components of the 3-vector
///
#[pyclass(name = "Vec3", module = "edm4eic")]
#[derive(Clone)]
pub struct PyVec3(pub Vec3);

#[pymethods]
impl PyVec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vec3::new(x, y, z))
    }
    fn __add__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(other_vec) = other.extract::<PyRef<Self>>() {
            Ok(Self(self.0 + other_vec.0))
        } else if let Ok(0) = other.extract::<usize>() {
            Ok(self.clone())
        } else {
            Err(PyTypeError::new_err("Unsupported operand type for +"))
        }
    }
    fn __radd__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        self.__add__(other)
    }
    fn __sub__(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }
    fn __neg__(&self) -> Self {
        Self(-self.0)
    }
    fn __mul__(&self, other: f64) -> Self {
        Self(self.0 * other)
    }
    fn __rmul__(&self, other: f64) -> Self {
        Self(self.0 * other)
    }
    fn __truediv__(&self, other: f64) -> Self {
        Self(self.0 / other)
    }
    fn __repr__(&self) -> String {
        format!("Vec3(x={}, y={}, z={})", self.0.x, self.0.y, self.0.z)
    }
    #[getter]
    fn x(&self) -> f64 {
        self.0.x
    }
    #[getter]
    fn y(&self) -> f64 {
        self.0.y
    }
    #[getter]
    fn z(&self) -> f64 {
        self.0.z
    }
    /// The transverse magnitude
    #[getter]
    fn pt(&self) -> f64 {
        self.0.pt()
    }
    /// The radial distance from the beam axis
    #[getter]
    fn r(&self) -> f64 {
        self.0.r()
    }
    /// The pseudorapidity
    #[getter]
    fn eta(&self) -> f64 {
        self.0.eta()
    }
    /// The cosine of the polar angle
    #[getter]
    fn cos_theta(&self) -> f64 {
        self.0.costheta()
    }
    #[getter]
    fn theta(&self) -> f64 {
        self.0.theta()
    }
    #[getter]
    fn phi(&self) -> f64 {
        self.0.phi()
    }
    #[getter]
    fn mag(&self) -> f64 {
        self.0.mag()
    }
    #[getter]
    fn unit(&self) -> Self {
        Self(self.0.unit())
    }
    fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }
    fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(&other.0))
    }
    /// Form a 4-momentum with the given mass
    fn with_mass(&self, mass: f64) -> PyVec4 {
        PyVec4(self.0.with_mass(mass))
    }
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &<[f64; 3]>::from(self.0))
    }
}

/// A 4-momentum formed from Cartesian components and the energy
///
/// Parameters
/// ----------
/// px, py, pz, e : float
///     The Cartesian components of the 3-momentum and the energy
///
#[pyclass(name = "Vec4", module = "edm4eic")]
#[derive(Clone)]
pub struct PyVec4(pub Vec4);

#[pymethods]
impl PyVec4 {
    #[new]
    fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self(Vec4::new(px, py, pz, e))
    }
    fn __add__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(other_vec) = other.extract::<PyRef<Self>>() {
            Ok(Self(self.0 + other_vec.0))
        } else if let Ok(0) = other.extract::<usize>() {
            Ok(self.clone())
        } else {
            Err(PyTypeError::new_err("Unsupported operand type for +"))
        }
    }
    fn __radd__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        self.__add__(other)
    }
    fn __sub__(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }
    fn __repr__(&self) -> String {
        self.0.to_p4_string()
    }
    #[getter]
    fn vec3(&self) -> PyVec3 {
        PyVec3(self.0.vec3())
    }
    #[getter]
    fn e(&self) -> f64 {
        self.0.e()
    }
    #[getter]
    fn m(&self) -> f64 {
        self.0.m()
    }
    #[getter]
    fn pt(&self) -> f64 {
        self.0.pt()
    }
    #[getter]
    fn eta(&self) -> f64 {
        self.0.eta()
    }
    /// Boost into the frame moving with velocity ``beta``
    fn boost(&self, beta: &PyVec3) -> Self {
        Self(self.0.boost(&beta.0))
    }
}
