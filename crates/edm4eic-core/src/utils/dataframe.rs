//! Batch application of the kinematics functions over ordered collections of records, and the
//! column definitions a dataframe engine registers them under.
//!
//! The eager functions ([`pt`], [`eta`], [`cos_theta`], [`r`]) return one value per record, in
//! record order. The `*_iter` variants are lazy and can be cloned to restart the sequence.

use std::{fmt::Display, str::FromStr, sync::Arc};

use arrow::{
    array::{ArrayRef, Float64Builder, ListArray, ListBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use serde::{Deserialize, Serialize};

use crate::{
    data::{HasMomentum, HasPosition},
    utils::{enums::Kinematic, kinematics},
    Edm4eicError, Edm4eicResult,
};

/// Lazily compute the transverse momentum of each record.
pub fn pt_iter<T: HasMomentum>(
    collection: &[T],
) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
    collection.iter().map(|record| {
        let p = record.momentum();
        kinematics::pt(p.x, p.y)
    })
}

/// Lazily compute the pseudorapidity of each record.
pub fn eta_iter<T: HasMomentum>(
    collection: &[T],
) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
    collection.iter().map(|record| {
        let p = record.momentum();
        kinematics::eta(p.x, p.y, p.z)
    })
}

/// Lazily compute the cosine of the polar angle of each record.
pub fn cos_theta_iter<T: HasMomentum>(
    collection: &[T],
) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
    collection.iter().map(|record| {
        let p = record.momentum();
        kinematics::cos_theta(p.x, p.y, p.z)
    })
}

/// Lazily compute the radial distance of each record from the beam axis.
pub fn r_iter<T: HasPosition>(collection: &[T]) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
    collection.iter().map(|record| {
        let x = record.position();
        kinematics::r(x.x, x.y)
    })
}

/// The transverse momentum of each record.
pub fn pt<T: HasMomentum>(collection: &[T]) -> Vec<f64> {
    pt_iter(collection).collect()
}

/// The pseudorapidity of each record.
pub fn eta<T: HasMomentum>(collection: &[T]) -> Vec<f64> {
    eta_iter(collection).collect()
}

/// The cosine of the polar angle of each record.
pub fn cos_theta<T: HasMomentum>(collection: &[T]) -> Vec<f64> {
    cos_theta_iter(collection).collect()
}

/// The radial distance of each record from the beam axis.
pub fn r<T: HasPosition>(collection: &[T]) -> Vec<f64> {
    r_iter(collection).collect()
}

/// Apply any [`Kinematic`] to the momenta of a collection.
pub fn momentum_column<T: HasMomentum>(collection: &[T], kinematic: Kinematic) -> Vec<f64> {
    collection
        .iter()
        .map(|record| kinematic.apply(record.momentum()))
        .collect()
}

/// Apply any [`Kinematic`] to the positions of a collection.
pub fn position_column<T: HasPosition>(collection: &[T], kinematic: Kinematic) -> Vec<f64> {
    collection
        .iter()
        .map(|record| kinematic.apply(record.position()))
        .collect()
}

/// A named column transformation: apply `kinematic` to every record of `collection`.
///
/// This is the unit a dataframe engine registers, e.g.
/// `Define("MCParticles_pt", "edm4eic::utils::pt(MCParticles)")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Name of the output column
    pub name: String,
    /// The function to apply
    pub kinematic: Kinematic,
    /// Name of the input collection
    pub collection: String,
}

impl Definition {
    pub fn new<N: Into<String>, C: Into<String>>(
        name: N,
        kinematic: Kinematic,
        collection: C,
    ) -> Self {
        Self {
            name: name.into(),
            kinematic,
            collection: collection.into(),
        }
    }

    /// Parse an expression of the form `edm4eic::utils::pt(MCParticles)` into a [`Definition`]
    /// producing the column `name`.
    pub fn parse<N: Into<String>>(name: N, expression: &str) -> Edm4eicResult<Self> {
        let parse_error = || Edm4eicError::ParseError {
            name: expression.to_string(),
            object: "Definition".to_string(),
        };
        let expression_trimmed = expression.trim();
        let (function, rest) = expression_trimmed.split_once('(').ok_or_else(parse_error)?;
        let collection = rest.strip_suffix(')').ok_or_else(parse_error)?.trim();
        if collection.is_empty()
            || !collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(parse_error());
        }
        let kinematic = Kinematic::from_str(function)?;
        Ok(Self::new(name, kinematic, collection))
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}({})", self.name, self.kinematic, self.collection)
    }
}

/// The result of evaluating a [`Definition`]: one list of values per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Name of the column
    pub name: String,
    /// Values, outer index over events and inner index over records
    pub values: Vec<Vec<f64>>,
}

impl Column {
    pub fn new<N: Into<String>>(name: N, values: Vec<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of events (rows) in the column.
    pub fn n_events(&self) -> usize {
        self.values.len()
    }

    /// All values concatenated in event order.
    pub fn flatten(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// The Arrow field describing this column.
    pub fn field(&self) -> Field {
        Field::new(
            self.name.clone(),
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        )
    }

    /// Convert to an Arrow list array with one list per event.
    pub fn to_arrow(&self) -> ListArray {
        let mut builder = ListBuilder::new(Float64Builder::with_capacity(
            self.values.iter().map(Vec::len).sum(),
        ));
        for event_values in &self.values {
            builder.values().append_slice(event_values);
            builder.append(true);
        }
        builder.finish()
    }
}

/// Gather columns into a single Arrow [`RecordBatch`] for hand-off to a columnar engine.
///
/// All columns must have the same number of events.
pub fn columns_to_record_batch(columns: &[Column]) -> Edm4eicResult<RecordBatch> {
    let n_events = columns.first().map_or(0, Column::n_events);
    for column in columns {
        if column.n_events() != n_events {
            return Err(Edm4eicError::LengthMismatch {
                context: format!("Column \"{}\"", column.name),
                expected: n_events,
                actual: column.n_events(),
            });
        }
    }
    let schema = Schema::new(columns.iter().map(Column::field).collect::<Vec<_>>());
    let arrays = columns
        .iter()
        .map(|column| Arc::new(column.to_arrow()) as ArrayRef)
        .collect::<Vec<_>>();
    Ok(RecordBatch::try_new(Arc::new(schema), arrays)?)
}
