//! Provides a sparse set of state ids as an alternative to HashSets.

use super::StateId;

/// A set of states with constant time insertion, membership and clearing,
/// that iterates in insertion order.
#[derive(Clone, Default)]
pub struct StateSet {
    dense: Vec<StateId>,
    sparse: Vec<usize>,
}

impl StateSet {
    /// Initializes a new set taking a value representing the number of
    /// states the set can hold before reallocating.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            dense: vec![],
            sparse: vec![0; max_len],
        }
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the number of states the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Inserts a state into the set, returning `true` if it was not already
    /// present.
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(&id) {
            return false;
        }

        let val = id.as_usize();
        if self.sparse.len() <= val {
            // double the size.
            self.resize((val + 1) * 2)
        }

        self.sparse[val] = self.dense.len();
        self.dense.push(id);
        true
    }

    /// Returns `true` if the set contains a state.
    pub fn contains(&self, id: &StateId) -> bool {
        self.sparse
            .get(id.as_usize())
            .map(|&dense_idx| self.dense.get(dense_idx) == Some(id))
            // if none, the bounds of the set are exceeded and thus doesn't
            // contain the value.
            .unwrap_or(false)
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.dense.clear();
    }

    /// Returns an iterator over the states in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, StateId> {
        self.dense.iter()
    }

    /// Returns the members of the set in ascending id order.
    pub fn to_sorted_vec(&self) -> Vec<StateId> {
        let mut members = self.dense.clone();
        members.sort_unstable();
        members
    }

    fn resize(&mut self, new_len: usize) {
        self.sparse.resize(new_len, 0)
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl Eq for StateSet {}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        let mut set = StateSet::new(0);
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a StateId;
    type IntoIter = std::slice::Iter<'a, StateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "StateSet({:?})", self.to_sorted_vec())
    }
}
