//! `edm4eic` provides the kinematics utilities used when analyzing Electron-Ion Collider event
//! data stored in the EDM4eic data model. It gives transverse momentum, pseudorapidity, the cosine
//! of the polar angle and the radial distance from the beam axis, both as scalar functions and
//! applied record-by-record over whole collections, so that a columnar dataframe engine can
//! register them as column transformations.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//!   - [Scalar Functions](#scalar-functions)
//!   - [Defining Columns](#defining-columns)
//! - [Initialization](#initialization)
//! - [Conventions](#conventions)
//!
//! # Key Features
//! * Pure, allocation-free scalar kinematics in [`utils::kinematics`].
//! * Element-wise application over any collection whose records carry a momentum or a position
//!   ([`traits::HasMomentum`], [`traits::HasPosition`]).
//! * Column [`Definition`]s parsed from the names a dataframe engine uses, e.g.
//!   `edm4eic::utils::pt(MCParticles)`, evaluated over a [`Dataset`] in parallel with
//!   [`rayon`](https://github.com/rayon-rs/rayon).
//! * Hand-off of evaluated columns as Arrow list arrays.
//! * An explicit, idempotent [`Runtime`] lifecycle for the native dictionary and dataframe
//!   libraries.
//!
//! # Quick Start
//! ## Scalar Functions
//! ```rust
//! use edm4eic::{cos_theta, eta, pt};
//!
//! assert_eq!(pt(3.0, 4.0), 5.0);
//! assert_eq!(cos_theta(3.0, 4.0, 0.0), 0.0);
//! assert_eq!(eta(0.0, 0.0, 5.0), f64::INFINITY);
//! ```
//!
//! ## Defining Columns
//! ```rust
//! use edm4eic::{Dataset, Definition, Event, MCParticle, Vec3};
//!
//! let event = Event::new().with_collection(
//!     "MCParticles",
//!     vec![MCParticle {
//!         momentum: Vec3::new(3.0, 4.0, 0.0),
//!         ..Default::default()
//!     }],
//! );
//! let dataset: Dataset = vec![event].into_iter().collect();
//! let definition = Definition::parse("MCParticles_pt", "edm4eic::utils::pt(MCParticles)")?;
//! let column = dataset.evaluate(&definition)?;
//! assert_eq!(column.values, vec![vec![5.0]]);
//! # Ok::<(), edm4eic::Edm4eicError>(())
//! ```
//!
//! # Initialization
//! Before registering columns with a native dataframe engine, call [`runtime::init`] once at the
//! application entry point. It verifies `libedm4eicDict.so`, `libedm4eicRDF.so` and the
//! kinematics headers under the directories named by `EDM4EIC_LIBRARY_PATH` and
//! `EDM4EIC_INCLUDE_PATH`. A missing artifact is a fatal [`Edm4eicError::LoadError`] which is
//! returned again on every later call. Nothing is loaded as a side effect of linking this crate.
//!
//! # Conventions
//! Pseudorapidity is computed as $`\sinh^{-1}(p_z / p_T)`$. Along the beam axis it is $`\pm\infty`$
//! with the sign of $`p_z`$, and the null vector gives NaN for both $`\eta`$ and
//! $`\cos\theta`$. Lengths are in centimeters, times in nanoseconds and energies in GeV (see
//! [`utils::units`]).
#![warn(clippy::perf, clippy::style, missing_docs)]

/// Records, collections, events and datasets.
pub mod data {
    pub use edm4eic_core::data::{
        test_dataset, test_event, Collection, Dataset, Event, MCParticle, SimTrackerHit,
        TrackParameters, TrackerHit,
    };
}
/// Kinematics functions, vectors, units and helpers.
pub mod utils {
    pub use edm4eic_core::utils::*;
}
/// Traits marking which components a record carries.
pub mod traits {
    pub use edm4eic_core::traits::*;
}
/// The explicit initialization lifecycle.
pub mod runtime {
    pub use edm4eic_core::runtime::{
        finalize, global, init, init_with, is_initialized, Artifact, ArtifactKind, Context,
        Runtime, RuntimeConfig, INCLUDE_PATH_ENV, LIBRARY_PATH_ENV,
    };
}

pub use edm4eic_core::data::{
    Collection, Dataset, Event, MCParticle, SimTrackerHit, TrackParameters, TrackerHit,
};
pub use edm4eic_core::runtime::{Context, Runtime, RuntimeConfig};
pub use edm4eic_core::utils::dataframe::{columns_to_record_batch, Column, Definition};
pub use edm4eic_core::utils::enums::{Input, Kinematic};
pub use edm4eic_core::utils::kinematics::{cos_theta, eta, p, phi, pt, r, theta};
pub use edm4eic_core::utils::vectors::{Vec3, Vec4};
pub use edm4eic_core::{Edm4eicError, Edm4eicResult};
pub use serde::{Deserialize, Serialize};
