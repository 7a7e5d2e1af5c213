//! # Alphabets
//!
//! Ordered sets of distinct identifiers. The position of an identifier is its
//! row or column in every probability matrix, so the order is fixed once an
//! [`Alphabet`] is built.

use std::collections::HashMap;
use std::ops::Index;

use super::Identifier;

/// Immutable ordered set of identifiers with O(1) index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet<T: Identifier> {
    items: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Identifier> Alphabet<T> {
    /// Builds an alphabet, keeping the first occurrence of each identifier.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut builder = AlphabetBuilder::new();
        builder.extend(items);
        builder.build()
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the alphabet has no identifiers.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of `item`, if present.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.index.get(item).copied()
    }

    /// Identifier at `idx`.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    /// Returns `true` if `item` belongs to the alphabet.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Iterates identifiers in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Identifiers in index order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Identifier> Index<usize> for Alphabet<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.items[idx]
    }
}

impl<T: Identifier> IntoIterator for Alphabet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Identifier> IntoIterator for &'a Alphabet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Identifier> FromIterator<T> for Alphabet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Accumulates distinct identifiers in first-seen order.
///
/// Used while identifiers are still being discovered (supervised training
/// extends the state space from the data); [`AlphabetBuilder::build`]
/// freezes the current contents into an [`Alphabet`].
#[derive(Debug, Clone)]
pub struct AlphabetBuilder<T: Identifier> {
    items: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Identifier> AlphabetBuilder<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds `item` if unseen and returns its position either way.
    pub fn insert(&mut self, item: T) -> usize {
        if let Some(&idx) = self.index.get(&item) {
            return idx;
        }
        let idx = self.items.len();
        self.index.insert(item.clone(), idx);
        self.items.push(item);
        idx
    }

    /// Adds every unseen item from `items`.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.insert(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identifiers collected so far.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Snapshot of the current contents.
    pub fn build(&self) -> Alphabet<T> {
        Alphabet {
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: Identifier> Default for AlphabetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifier> From<Alphabet<T>> for AlphabetBuilder<T> {
    fn from(alphabet: Alphabet<T>) -> Self {
        Self {
            items: alphabet.items,
            index: alphabet.index,
        }
    }
}
