use edm4eic_python::{
    finalize, init, is_initialized,
    utils::{
        kinematics::{
            cos_theta, cos_theta_array, eta, eta_array, p, phi, pt, pt_array, r, r_array, theta,
        },
        vectors::{PyVec3, PyVec4},
    },
    version,
};
use pyo3::prelude::*;

#[pymodule]
fn edm4eic(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(init, m)?)?;
    m.add_function(wrap_pyfunction!(finalize, m)?)?;
    m.add_function(wrap_pyfunction!(is_initialized, m)?)?;
    m.add_class::<PyVec3>()?;
    m.add_class::<PyVec4>()?;

    let utils = PyModule::new(m.py(), "utils")?;
    utils.add_function(wrap_pyfunction!(pt, &utils)?)?;
    utils.add_function(wrap_pyfunction!(eta, &utils)?)?;
    utils.add_function(wrap_pyfunction!(cos_theta, &utils)?)?;
    utils.add_function(wrap_pyfunction!(r, &utils)?)?;
    utils.add_function(wrap_pyfunction!(p, &utils)?)?;
    utils.add_function(wrap_pyfunction!(theta, &utils)?)?;
    utils.add_function(wrap_pyfunction!(phi, &utils)?)?;
    utils.add_function(wrap_pyfunction!(pt_array, &utils)?)?;
    utils.add_function(wrap_pyfunction!(eta_array, &utils)?)?;
    utils.add_function(wrap_pyfunction!(cos_theta_array, &utils)?)?;
    utils.add_function(wrap_pyfunction!(r_array, &utils)?)?;
    m.add_submodule(&utils)?;
    Ok(())
}
