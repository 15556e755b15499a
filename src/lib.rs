//! Sparse linear algebra, probability, automata and signal transforms over
//! semirings, with sparse vectors and matrices stored as hash maps.

pub mod advisory;
pub mod analysis;
pub mod automata;
pub mod dense;
pub mod error;
pub mod group;
pub mod lattice;
pub mod matrix;
pub mod probability;
pub mod semiring;
pub mod sparse;
pub mod transforms;
pub mod trie;
mod utils;

mod proptests;

pub use error::AlgebraError;
pub use semiring::Semiring;
pub use sparse::{SparseKey, SparseMatrix, SparseVector};
pub use trie::AlgebraicTrie;
pub use utils::{Direction, IterationConfig};
