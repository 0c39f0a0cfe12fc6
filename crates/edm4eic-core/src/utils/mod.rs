/// Momentum reconstruction helpers for analysis code.
pub mod analysis;
/// A bidirectional lookup over one-to-many associations between collections.
pub mod association;
/// Element-wise application of the kinematics functions over whole collections, and the column
/// definitions handed to a dataframe engine.
pub mod dataframe;
/// Enumerations naming the registered kinematics functions and their inputs.
pub mod enums;
/// Scalar kinematics on bare Cartesian components.
pub mod kinematics;
/// The EDM4eic unit system.
pub mod units;
/// Three- and four-vectors with kinematic accessors.
pub mod vectors;
