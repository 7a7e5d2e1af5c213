pub mod alphabet;
pub mod token;

use std::fmt::Debug;
use std::hash::Hash;

pub use alphabet::{Alphabet, AlphabetBuilder};
pub use token::{Token, is_labelled, strip_labels, unlabelled_sequence};

/// Bound shared by state and symbol identifiers.
///
/// Blanket-implemented for every type that qualifies, so `&'static str`,
/// `String`, `char` and small enums all work out of the box.
pub trait Identifier: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
