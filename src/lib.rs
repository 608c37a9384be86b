#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::wildcard_imports,
    clippy::enum_glob_use
)]

/// Query sequence cleaning and alphabets.
pub mod data;
/// Profile HMMs, Viterbi decoding and motif segmentation.
pub mod phmm;

/// Generate random sequences, optionally with planted motifs.
#[cfg(feature = "rand")]
pub mod generate;

/// Common structures and traits re-exported
pub mod prelude {
    pub use crate::data::{Alphabet, clean_sequence};
    #[cfg(feature = "rand")]
    pub use crate::generate::{rand_sequence, rand_sequence_with_motifs};
    pub use crate::phmm::{
        AlignedPath, ConsensusTemplate, DecodeConfig, MatchEmissions, PatternMatch, PhmmError, ProfileModel, StateLabel,
        TransitionProbabilities, ViterbiPath,
    };
}
