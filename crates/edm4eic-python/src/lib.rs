use std::path::PathBuf;

use edm4eic_core::runtime::{self, RuntimeConfig};
use pyo3::prelude::*;
use tracing::debug;

pub mod utils {
    pub mod kinematics;
    pub mod vectors;
}

/// The version of the compiled extension
#[pyfunction]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Verify the native EDM4eic libraries and headers
///
/// The directories default to the ``EDM4EIC_LIBRARY_PATH`` and ``EDM4EIC_INCLUDE_PATH``
/// environment variables. Calling this again after it succeeded does nothing.
///
/// Parameters
/// ----------
/// library_dir : str, optional
///     Directory holding ``libedm4eicDict.so`` and ``libedm4eicRDF.so``
/// include_dir : str, optional
///     Include directory holding the ``edm4eic/utils`` headers
///
/// Raises
/// ------
/// ImportError
///     If any library or header is missing. The failure is permanent for this process.
///
#[pyfunction]
#[pyo3(signature = (library_dir=None, include_dir=None))]
pub fn init(library_dir: Option<PathBuf>, include_dir: Option<PathBuf>) -> PyResult<()> {
    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = library_dir {
        config = config.with_library_dir(dir);
    }
    if let Some(dir) = include_dir {
        config = config.with_include_dir(dir);
    }
    let context = runtime::init_with(&config)?;
    debug!(artifacts = context.artifacts().len(), "initialized from Python");
    Ok(())
}

/// Release the native context so that ``init`` may be called again
#[pyfunction]
pub fn finalize() {
    runtime::finalize()
}

/// Whether ``init`` has succeeded
#[pyfunction]
pub fn is_initialized() -> bool {
    runtime::is_initialized()
}
