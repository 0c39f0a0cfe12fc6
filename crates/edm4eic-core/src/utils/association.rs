use std::hash::Hash;

use indexmap::IndexMap;

/// An index over a collection of associations which answers "what is linked to this object" in
/// both directions in constant time.
///
/// Each association links one `from` object to one `to` object. An object may appear in any
/// number of associations, so both directions are one-to-many. Iteration follows the order in
/// which each `from` object was first seen.
///
/// ```
/// use edm4eic_core::utils::association::AssociationLookup;
///
/// let lookup: AssociationLookup<&str, u64> =
///     [("raw_0", 10), ("raw_0", 11), ("raw_1", 11)].into_iter().collect();
/// assert_eq!(lookup.lookup_from_to(&"raw_0"), &[10, 11]);
/// assert_eq!(lookup.lookup_to_from(&11), &["raw_0", "raw_1"]);
/// assert_eq!(lookup.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct AssociationLookup<F, T> {
    from_to: IndexMap<F, Vec<T>>,
    to_from: IndexMap<T, Vec<F>>,
    total: usize,
}

impl<F, T> Default for AssociationLookup<F, T> {
    fn default() -> Self {
        Self {
            from_to: IndexMap::default(),
            to_from: IndexMap::default(),
            total: 0,
        }
    }
}

impl<F, T> AssociationLookup<F, T>
where
    F: Hash + Eq + Clone,
    T: Hash + Eq + Clone,
{
    /// Index a collection of associations, using `get_from` and `get_to` to extract the two linked
    /// objects from each one.
    pub fn new<A, I, GF, GT>(associations: I, get_from: GF, get_to: GT) -> Self
    where
        I: IntoIterator<Item = A>,
        GF: Fn(&A) -> F,
        GT: Fn(&A) -> T,
    {
        let mut lookup = Self::default();
        for association in associations {
            lookup.insert(get_from(&association), get_to(&association));
        }
        lookup
    }

    /// Record a single association.
    pub fn insert(&mut self, from: F, to: T) {
        self.from_to.entry(from.clone()).or_default().push(to.clone());
        self.to_from.entry(to).or_default().push(from);
        self.total += 1;
    }

    /// All objects linked from `from`, in insertion order. Empty if there are none.
    pub fn lookup_from_to(&self, from: &F) -> &[T] {
        self.from_to.get(from).map(Vec::as_slice).unwrap_or_default()
    }

    /// All objects linking to `to`, in insertion order. Empty if there are none.
    pub fn lookup_to_from(&self, to: &T) -> &[F] {
        self.to_from.get(to).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_from_associations(&self, from: &F) -> bool {
        self.from_to.contains_key(from)
    }

    pub fn has_to_associations(&self, to: &T) -> bool {
        self.to_from.contains_key(to)
    }

    /// Iterate over every `from` object and the objects it links to.
    pub fn iter(&self) -> impl Iterator<Item = (&F, &[T])> {
        self.from_to.iter().map(|(from, to)| (from, to.as_slice()))
    }

    /// Iterate over every `to` object and the objects linking to it.
    pub fn iter_to_from(&self) -> impl Iterator<Item = (&T, &[F])> {
        self.to_from.iter().map(|(to, from)| (to, from.as_slice()))
    }

    /// The total number of associations indexed, counting duplicates.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl<F, T> FromIterator<(F, T)> for AssociationLookup<F, T>
where
    F: Hash + Eq + Clone,
    T: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
        Self::new(iter, |(from, _)| from.clone(), |(_, to)| to.clone())
    }
}
