//! ## Query sequence preparation.
//!
//! Query sequences are plain byte slices. Before decoding they are normally
//! *cleaned*: every byte that is not an ASCII letter or digit is dropped and
//! letters are converted to uppercase (see [`clean_sequence`]). Each remaining
//! byte is one symbol.
//!
//! The background distribution of a search is uniform over the distinct
//! symbols of the query, which are collected into an [`Alphabet`].

mod alphabet;
pub(crate) mod mappings;
mod validation;

#[cfg(feature = "fuzzing")]
pub mod arbitrary;

pub use alphabet::*;
pub use validation::*;
