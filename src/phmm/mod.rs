//! Profile Hidden Markov Models (pHMMs) for motif search.
//!
//! A [`ProfileModel`] of size `N` has, for every position `p` in `1..=N`, a
//! match state `Mp`, an insert state `Ip` and a delete state `Dp`. The last
//! position has no insert state; a single random state `R` models the
//! background between motif copies instead:
//!
//! ```text
//! R  -> R | M1 | D1
//! Mp -> Ip | Mp+1 | Dp+1      MN -> R | M1
//! Ip -> Ip | Mp+1 | Dp+1
//! Dp -> Mp+1 | Dp+1           DN -> R | M1
//! ```
//!
//! The transitions `MN -> M1` and `DN -> M1` let tandem copies of a motif
//! follow one another without passing through the random state.
//!
//! Only the match states have emission tables. Every other state, and the
//! background against which match emissions are scored, is uniform over the
//! distinct symbols of the query being decoded. The emission scores therefore
//! depend on the query, and each model caches them per [`Alphabet`].
//!
//! [`ProfileModel::decode`] finds the most probable state path for a query
//! with the Viterbi algorithm, and [`ProfileModel::find_matches`] cuts that
//! path into [`PatternMatch`] segments. Enabling the *multiversion* feature
//! compiles the row kernel of the algorithm for several SIMD targets and
//! selects one at runtime; the results are the same either way.
//!
//! [`Alphabet`]: crate::data::Alphabet

mod config;
mod display;
mod errors;
mod models;
mod segment;
mod state;
mod tables;
mod template;
mod viterbi;


pub use config::*;
pub use display::*;
pub use errors::*;
pub use models::*;
pub use segment::*;
pub use state::StateLabel;
pub use tables::{ColumnParams, DEFAULT_CACHE_CAPACITY, EmissionScores};
pub use template::*;
pub use viterbi::ViterbiPath;

pub(crate) use state::{PhmmState, PhmmStateArray};
