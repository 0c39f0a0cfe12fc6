//! # edm4eic-core
//!
//! This is an internal crate used by `edm4eic`.
#![warn(clippy::perf, clippy::style)]
#![allow(clippy::excessive_precision)]

use std::path::PathBuf;

#[cfg(feature = "python")]
use pyo3::PyErr;
use thiserror::Error;

/// Methods for holding and evaluating [`Event`](crate::data::Event)-based collections.
pub mod data;
/// The explicit initialization lifecycle which verifies the native collaborator artifacts.
pub mod runtime;
/// Utility functions, enums, and traits
pub mod utils;
/// Useful traits for all crate structs
pub mod traits {
    pub use crate::data::{HasMomentum, HasPosition};
}

pub use crate::data::{
    Collection, Dataset, Event, MCParticle, SimTrackerHit, TrackParameters, TrackerHit,
};
pub use crate::runtime::{ArtifactKind, Context, Runtime, RuntimeConfig};
pub use crate::utils::dataframe::{Column, Definition};
pub use crate::utils::enums::{Input, Kinematic};
pub use crate::utils::kinematics::{cos_theta, eta, p, phi, pt, r, theta};
pub use crate::utils::vectors::{Vec3, Vec4};

pub type Edm4eicResult<T> = Result<T, Edm4eicError>;

/// The error type used by all `edm4eic` internal methods
#[derive(Error, Debug)]
pub enum Edm4eicError {
    /// An alias for [`std::io::Error`].
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    /// An alias for [`arrow::error::ArrowError`].
    #[error("Arrow Error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
    /// An alias for [`shellexpand::LookupError`].
    #[error("Failed to expand path: {0}")]
    LookupError(#[from] shellexpand::LookupError<std::env::VarError>),
    /// A required native artifact (shared library or header) could not be found or read. This
    /// error is fatal: the [`Runtime`] which reported it refuses every later initialization.
    #[error("Failed to load {kind} \"{name}\" (searched {})", .searched.display())]
    LoadError {
        /// The kind of artifact which failed to load
        kind: ArtifactKind,
        /// The file name of the artifact
        name: String,
        /// The full path which was probed
        searched: PathBuf,
    },
    /// Columns were requested from a [`Runtime`] which has not been initialized.
    #[error("The edm4eic runtime has not been initialized!")]
    NotInitialized,
    /// An error which occurs when the user tries to parse an invalid string of text, typically
    /// into an enum variant.
    #[error("Failed to parse string: \"{name}\" does not correspond to a valid \"{object}\"!")]
    ParseError {
        /// The string which was parsed
        name: String,
        /// The name of the object it failed to parse into
        object: String,
    },
    /// A registered function was applied to a collection whose records lack the component it
    /// reads.
    #[error("Function \"{function}\" requires records with a {required} but collection \"{collection}\" has none!")]
    SignatureError {
        /// Qualified name of the function
        function: String,
        /// Name of the collection it was applied to
        collection: String,
        /// The record component the function needs
        required: String,
    },
    /// An error which occurs when a definition names a collection that an event does not carry.
    #[error("No collection named \"{name}\" in event {event}!")]
    CollectionNotFound {
        /// Name of the missing collection
        name: String,
        /// Index of the offending event
        event: usize,
    },
    /// Two columns handed to the same record batch disagree on the number of events.
    #[error("{context}: expected {expected} rows but found {actual}")]
    LengthMismatch {
        /// Where the mismatch was detected
        context: String,
        /// Expected number of rows
        expected: usize,
        /// Actual number of rows
        actual: usize,
    },
    /// An error type for [`rayon`] thread pools
    #[cfg(feature = "rayon")]
    #[error("Error building thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
    /// A custom fallback error for errors too complex or too infrequent to warrant their own error
    /// category.
    #[error("{0}")]
    Custom(String),
}

impl Clone for Edm4eicError {
    // Load failures are replayed verbatim by the runtime, everything else collapses to its message
    fn clone(&self) -> Self {
        match self {
            Edm4eicError::LoadError {
                kind,
                name,
                searched,
            } => Edm4eicError::LoadError {
                kind: *kind,
                name: name.clone(),
                searched: searched.clone(),
            },
            Edm4eicError::NotInitialized => Edm4eicError::NotInitialized,
            _ => Edm4eicError::Custom(self.to_string()),
        }
    }
}

#[cfg(feature = "python")]
impl From<Edm4eicError> for PyErr {
    fn from(err: Edm4eicError) -> Self {
        use pyo3::exceptions::*;
        let err_string = err.to_string();
        match err {
            Edm4eicError::LoadError { .. } => PyImportError::new_err(err_string),
            Edm4eicError::LookupError(_)
            | Edm4eicError::ParseError { .. }
            | Edm4eicError::SignatureError { .. }
            | Edm4eicError::CollectionNotFound { .. }
            | Edm4eicError::LengthMismatch { .. } => PyValueError::new_err(err_string),
            Edm4eicError::NotInitialized => PyRuntimeError::new_err(err_string),
            Edm4eicError::ArrowError(_) | Edm4eicError::IOError(_) => {
                PyIOError::new_err(err_string)
            }
            #[cfg(feature = "rayon")]
            Edm4eicError::ThreadPoolError(_) => PyException::new_err(err_string),
            Edm4eicError::Custom(_) => PyException::new_err(err_string),
        }
    }
}
