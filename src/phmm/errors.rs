use crate::phmm::StateLabel;
use std::{error::Error, fmt};

/// An enum representing errors that can happen when building or decoding with
/// a profile HMM.
#[non_exhaustive]
#[derive(Clone, PartialEq)]
pub enum PhmmError {
    /// The model definition is malformed. Raised when the model is
    /// constructed, never during decoding.
    InvalidModel(ModelError),
    /// Every cell of the final column of the Viterbi matrix has probability
    /// zero, so no state path explains the sequence
    NoViablePath,
    /// The deadline passed or the cancel flag was raised while decoding
    Cancelled,
}

/// The ways in which a model definition can be malformed.
#[non_exhaustive]
#[derive(Clone, PartialEq)]
pub enum ModelError {
    /// Fewer than two match emission rows were given
    TooFewPositions(usize),
    /// The match emission rows must cover exactly positions `1..=N`; this
    /// position has none
    MissingEmissions(usize),
    /// The transition table has no row for transitions out of the random
    /// state
    MissingRandomTransitions,
    /// A transition refers to a state that does not exist in a model of this
    /// size
    UnknownState(StateLabel),
    /// A transition with nonzero probability that the model topology cannot
    /// take
    UnsupportedTransition { from: StateLabel, to: StateLabel },
    /// A transition probability that is not a number in `[0, 1]`
    InvalidTransition { from: StateLabel, to: StateLabel, prob: f64 },
    /// An emission probability that is not a number in `[0, 1]`
    InvalidEmission { position: usize, symbol: u8, prob: f64 },
    /// A textual state label that is not of the form `M<p>`, `I<p>`, `D<p>` or
    /// `R`
    InvalidLabel(String),
}

impl fmt::Display for PhmmError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhmmError::InvalidModel(e) => write!(f, "Invalid profile HMM: {e}"),
            PhmmError::NoViablePath => write!(f, "No state path with nonzero probability explains the sequence!"),
            PhmmError::Cancelled => write!(f, "Decoding was cancelled before it completed!"),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::TooFewPositions(n) => {
                write!(f, "the model must be at least 2 positions long, but {n} were given")
            }
            ModelError::MissingEmissions(p) => write!(f, "no match emissions were given for position {p}"),
            ModelError::MissingRandomTransitions => write!(f, "no transitions out of the random state were given"),
            ModelError::UnknownState(state) => write!(f, "the state {state} does not exist in this model"),
            ModelError::UnsupportedTransition { from, to } => {
                write!(f, "the transition {from} -> {to} is not part of the model topology")
            }
            ModelError::InvalidTransition { from, to, prob } => {
                write!(f, "the transition {from} -> {to} has invalid probability {prob}")
            }
            ModelError::InvalidEmission { position, symbol, prob } => write!(
                f,
                "the emission of {:?} by M{position} has invalid probability {prob}",
                char::from(*symbol)
            ),
            ModelError::InvalidLabel(label) => write!(f, "{label:?} is not a valid state label"),
        }
    }
}

impl fmt::Debug for PhmmError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Debug for ModelError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Error for PhmmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PhmmError::InvalidModel(e) => Some(e),
            _ => None,
        }
    }
}

impl Error for ModelError {}

impl From<ModelError> for PhmmError {
    #[inline]
    fn from(e: ModelError) -> Self {
        PhmmError::InvalidModel(e)
    }
}
