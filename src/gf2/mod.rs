//! Linear algebra over GF(2) for the Lights Out system

pub mod back_substitution;
pub mod eliminator;
pub mod equations;
pub mod matrix;

pub use back_substitution::{Assignment, BackSubstitutor};
pub use eliminator::{Gf2Eliminator, Pivot, ReducedSystem};
pub use equations::{EquationBuilder, EquationStatistics};
pub use matrix::Gf2Matrix;
