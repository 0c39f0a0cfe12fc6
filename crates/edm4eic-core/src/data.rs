use std::{fmt::Display, sync::Arc};

use auto_ops::impl_op_ex;
use indexmap::IndexMap;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    utils::{
        dataframe::{momentum_column, position_column, Column, Definition},
        enums::{Input, Kinematic},
        vectors::Vec3,
    },
    Edm4eicError, Edm4eicResult,
};

/// A record which carries a 3-momentum.
pub trait HasMomentum {
    /// The 3-momentum of the record.
    fn momentum(&self) -> Vec3;
}

/// A record which carries a 3-position.
pub trait HasPosition {
    /// The 3-position of the record.
    fn position(&self) -> Vec3;
}

impl HasMomentum for Vec3 {
    fn momentum(&self) -> Vec3 {
        *self
    }
}

impl HasPosition for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// A generated (Monte Carlo truth) particle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MCParticle {
    /// PDG particle code
    pub pdg: i32,
    /// Charge in units of the elementary charge
    pub charge: f32,
    /// Mass in GeV
    pub mass: f64,
    /// Momentum at the production vertex in GeV
    pub momentum: Vec3,
    /// Production vertex in cm
    pub vertex: Vec3,
}

impl HasMomentum for MCParticle {
    fn momentum(&self) -> Vec3 {
        self.momentum
    }
}

/// A simulated hit in a tracking detector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimTrackerHit {
    /// Detector cell identifier
    pub cell_id: u64,
    /// Deposited energy in GeV
    pub e_dep: f64,
    /// Hit time in ns
    pub time: f64,
    /// Hit position in cm
    pub position: Vec3,
    /// Momentum of the particle at the hit in GeV
    pub momentum: Vec3,
}

impl HasMomentum for SimTrackerHit {
    fn momentum(&self) -> Vec3 {
        self.momentum
    }
}

impl HasPosition for SimTrackerHit {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// A reconstructed hit on a planar tracking surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerHit {
    /// Detector cell identifier
    pub cell_id: u64,
    /// Hit position in cm
    pub position: Vec3,
    /// Hit time in ns
    pub time: f64,
    /// Deposited energy in GeV
    pub e_dep: f64,
}

impl HasPosition for TrackerHit {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Raw track parameters as produced by a track fit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackParameters {
    /// Polar angle of the momentum in rad
    pub theta: f64,
    /// Azimuthal angle of the momentum in rad
    pub phi: f64,
    /// Charge over momentum in 1/GeV
    pub q_over_p: f64,
    /// Time in ns
    pub time: f64,
}

/// An ordered collection of records of a single type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Collection {
    /// Generated particles
    MCParticles(Vec<MCParticle>),
    /// Simulated tracker hits
    SimTrackerHits(Vec<SimTrackerHit>),
    /// Reconstructed planar tracker hits
    TrackerHits(Vec<TrackerHit>),
}

impl Collection {
    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        match self {
            Collection::MCParticles(records) => records.len(),
            Collection::SimTrackerHits(records) => records.len(),
            Collection::TrackerHits(records) => records.len(),
        }
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The data model type name of the records.
    pub fn type_name(&self) -> &'static str {
        match self {
            Collection::MCParticles(_) => "edm4hep::MCParticle",
            Collection::SimTrackerHits(_) => "edm4hep::SimTrackerHit",
            Collection::TrackerHits(_) => "edm4eic::TrackerHit",
        }
    }

    /// Whether the records carry the given component.
    pub fn provides(&self, input: Input) -> bool {
        matches!(
            (self, input),
            (Collection::MCParticles(_), Input::Momentum)
                | (Collection::SimTrackerHits(_), _)
                | (Collection::TrackerHits(_), Input::Position)
        )
    }

    /// The momenta of the records, or [`None`] if they carry none.
    pub fn momenta(&self) -> Option<Vec<Vec3>> {
        match self {
            Collection::MCParticles(records) => Some(records.iter().map(|r| r.momentum()).collect()),
            Collection::SimTrackerHits(records) => {
                Some(records.iter().map(|r| r.momentum()).collect())
            }
            Collection::TrackerHits(_) => None,
        }
    }

    /// The positions of the records, or [`None`] if they carry none.
    pub fn positions(&self) -> Option<Vec<Vec3>> {
        match self {
            Collection::MCParticles(_) => None,
            Collection::SimTrackerHits(records) => {
                Some(records.iter().map(|r| r.position()).collect())
            }
            Collection::TrackerHits(records) => Some(records.iter().map(|r| r.position()).collect()),
        }
    }

    /// Apply a [`Kinematic`] to every record, or [`None`] if the records lack its input.
    pub fn evaluate(&self, kinematic: Kinematic) -> Option<Vec<f64>> {
        match (self, kinematic.input()) {
            (Collection::MCParticles(records), Input::Momentum) => {
                Some(momentum_column(records, kinematic))
            }
            (Collection::SimTrackerHits(records), Input::Momentum) => {
                Some(momentum_column(records, kinematic))
            }
            (Collection::SimTrackerHits(records), Input::Position) => {
                Some(position_column(records, kinematic))
            }
            (Collection::TrackerHits(records), Input::Position) => {
                Some(position_column(records, kinematic))
            }
            _ => None,
        }
    }
}

impl From<Vec<MCParticle>> for Collection {
    fn from(value: Vec<MCParticle>) -> Self {
        Collection::MCParticles(value)
    }
}

impl From<Vec<SimTrackerHit>> for Collection {
    fn from(value: Vec<SimTrackerHit>) -> Self {
        Collection::SimTrackerHits(value)
    }
}

impl From<Vec<TrackerHit>> for Collection {
    fn from(value: Vec<TrackerHit>) -> Self {
        Collection::TrackerHits(value)
    }
}

/// A single collision event: named collections of records plus string parameters.
///
/// Collections keep their insertion order, so iterating an [`Event`] is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    collections: IndexMap<String, Collection>,
    parameters: IndexMap<String, String>,
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Event:")?;
        for (name, collection) in &self.collections {
            writeln!(
                f,
                "  {name}: {} x {}",
                collection.len(),
                collection.type_name()
            )?;
        }
        for (key, value) in &self.parameters {
            writeln!(f, "  {key} = {value}")?;
        }
        Ok(())
    }
}

impl Event {
    /// Create an event with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Event::insert`].
    pub fn with_collection<N: Into<String>, C: Into<Collection>>(
        mut self,
        name: N,
        collection: C,
    ) -> Self {
        self.insert(name, collection);
        self
    }

    /// Builder-style [`Event::set_parameter`].
    pub fn with_parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_parameter(key, value);
        self
    }

    /// Add or replace a named collection, returning the previous one.
    pub fn insert<N: Into<String>, C: Into<Collection>>(
        &mut self,
        name: N,
        collection: C,
    ) -> Option<Collection> {
        self.collections.insert(name.into(), collection.into())
    }

    /// Set a string-valued event parameter.
    pub fn set_parameter<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Look up a collection by name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Look up an event parameter by name.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Names of the collections in insertion order.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Apply a [`Definition`] to this event.
    ///
    /// `index` is only used to label errors.
    pub fn evaluate(&self, definition: &Definition, index: usize) -> Edm4eicResult<Vec<f64>> {
        let collection =
            self.collection(&definition.collection)
                .ok_or_else(|| Edm4eicError::CollectionNotFound {
                    name: definition.collection.clone(),
                    event: index,
                })?;
        collection
            .evaluate(definition.kinematic)
            .ok_or_else(|| Edm4eicError::SignatureError {
                function: definition.kinematic.qualified_name(),
                collection: definition.collection.clone(),
                required: definition.kinematic.input().to_string(),
            })
    }
}

/// An event that can be used to test the kinematics definitions. It holds one generated electron
/// along the beam axis and one in the transverse plane, two simulated tracker hits and one
/// reconstructed planar hit.
pub fn test_event() -> Event {
    Event::new()
        .with_collection(
            "MCParticles",
            vec![
                MCParticle {
                    pdg: 11,
                    charge: -1.0,
                    mass: 0.000511,
                    momentum: Vec3::new(3.0, 4.0, 0.0),
                    vertex: Vec3::default(),
                },
                MCParticle {
                    pdg: 11,
                    charge: -1.0,
                    mass: 0.000511,
                    momentum: Vec3::new(0.0, 0.0, 5.0),
                    vertex: Vec3::default(),
                },
            ],
        )
        .with_collection(
            "SimTrackerHits",
            vec![
                SimTrackerHit {
                    cell_id: 0x0123456789abcdef,
                    e_dep: 1.2e-6,
                    time: 1.5,
                    position: Vec3::new(6.0, 8.0, 20.0),
                    momentum: Vec3::new(1.0, 1.0, 1.0),
                },
                SimTrackerHit {
                    cell_id: 0x0123456789abcdf0,
                    e_dep: 0.8e-6,
                    time: 2.5,
                    position: Vec3::new(-5.0, 12.0, 40.0),
                    momentum: Vec3::new(0.0, 2.0, 0.0),
                },
            ],
        )
        .with_collection(
            "TrackerHitPlanes",
            vec![TrackerHit {
                cell_id: 0x89abcdef,
                position: Vec3::new(0.0, -7.0, 10.0),
                time: 3.0,
                e_dep: 1.0e-6,
            }],
        )
        .with_parameter("EventType", "test")
}

/// A dataset that can be used to test the kinematics definitions. It contains three copies of
/// [`test_event`], the last of which has an empty `MCParticles` collection.
pub fn test_dataset() -> Dataset {
    let mut last = test_event();
    last.insert("MCParticles", Vec::<MCParticle>::new());
    Dataset::new(vec![
        Arc::new(test_event()),
        Arc::new(test_event()),
        Arc::new(last),
    ])
}

/// An ordered sequence of [`Event`]s.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<Arc<Event>>,
}

impl Dataset {
    /// Create a [`Dataset`] from a list of events.
    pub fn new(events: Vec<Arc<Event>>) -> Self {
        Self { events }
    }

    /// The number of events in the [`Dataset`].
    pub fn n_events(&self) -> usize {
        self.events.len()
    }

    /// The events in order.
    pub fn events(&self) -> &[Arc<Event>] {
        &self.events
    }

    /// Retrieve an event by index.
    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index).map(Arc::as_ref)
    }

    /// Iterate over the events in order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().map(Arc::as_ref)
    }

    /// Evaluate a [`Definition`] on every event, producing one list of values per event.
    ///
    /// Events are processed in parallel when the `rayon` feature is enabled. The output order
    /// always matches the event order, and if several events fail the error reported is the one
    /// from the lowest event index.
    ///
    /// This is the bare computation. Columns handed to a dataframe engine are registered through
    /// [`Context::define`](crate::runtime::Context::define), which requires a successful
    /// initialization.
    pub fn evaluate(&self, definition: &Definition) -> Edm4eicResult<Column> {
        debug!(
            column = %definition.name,
            function = %definition.kinematic,
            collection = %definition.collection,
            n_events = self.n_events(),
            "evaluating column definition"
        );
        #[cfg(feature = "rayon")]
        let values = self
            .events
            .par_iter()
            .enumerate()
            .map(|(index, event)| event.evaluate(definition, index))
            .collect::<Vec<Edm4eicResult<Vec<f64>>>>()
            .into_iter()
            .collect::<Edm4eicResult<Vec<Vec<f64>>>>()?;
        #[cfg(not(feature = "rayon"))]
        let values = self
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| event.evaluate(definition, index))
            .collect::<Edm4eicResult<Vec<Vec<f64>>>>()?;
        Ok(Column::new(definition.name.clone(), values))
    }

    /// Evaluate several [`Definition`]s, in order.
    pub fn define_all(&self, definitions: &[Definition]) -> Edm4eicResult<Vec<Column>> {
        definitions
            .iter()
            .map(|definition| self.evaluate(definition))
            .collect()
    }

    /// Like [`Dataset::define_all`], but run inside a dedicated thread pool of the given size.
    #[cfg(feature = "rayon")]
    pub fn define_all_with_threads(
        &self,
        definitions: &[Definition],
        num_threads: usize,
    ) -> Edm4eicResult<Vec<Column>> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?
            .install(|| self.define_all(definitions))
    }
}

impl FromIterator<Event> for Dataset {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Arc::new).collect())
    }
}

impl_op_ex!(+ |a: &Dataset, b: &Dataset| -> Dataset {
    Dataset::new(a.events.iter().chain(b.events.iter()).cloned().collect())
});
