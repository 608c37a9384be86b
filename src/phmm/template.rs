use crate::phmm::{MatchEmissions, PhmmError, ProfileModel, StateLabel, TransitionProbabilities};

/// Generates a model from a consensus sequence: `Match(p)` emits the `p`-th
/// consensus symbol with probability one, and every position shares the same
/// transition probabilities.
///
/// The defaults describe a sparse motif in a long background: the random state
/// mostly stays put, and a motif copy tolerates occasional insertions and
/// deletions. All fields can be changed before calling
/// [`build`](ConsensusTemplate::build).
///
/// ```
/// # use motif_hmm::phmm::ConsensusTemplate;
/// let model = ConsensusTemplate::default().build(b"ACGT").unwrap();
/// let path = model.decode(b"TTACGTTT").unwrap();
/// assert_eq!(path.to_codes(), b"RRMMMMRR");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConsensusTemplate {
    pub random_to_random:      f64,
    pub random_to_match:       f64,
    pub random_to_delete:      f64,
    pub match_to_insert:       f64,
    pub match_to_match:        f64,
    pub match_to_delete:       f64,
    pub insert_to_insert:      f64,
    pub insert_to_match:       f64,
    pub insert_to_delete:      f64,
    pub delete_to_match:       f64,
    pub delete_to_delete:      f64,
    /// `Match(N) -> Random`
    pub last_match_to_random:  f64,
    /// `Match(N) -> Match(1)`, entering a tandem copy directly
    pub last_match_to_first:   f64,
    /// `Delete(N) -> Random`
    pub last_delete_to_random: f64,
}

impl Default for ConsensusTemplate {
    fn default() -> Self {
        Self {
            random_to_random:      0.9,
            random_to_match:       0.05,
            random_to_delete:      0.05,
            match_to_insert:       0.3,
            match_to_match:        0.6,
            match_to_delete:       0.1,
            insert_to_insert:      0.4,
            insert_to_match:       0.5,
            insert_to_delete:      0.1,
            delete_to_match:       0.9,
            delete_to_delete:      0.1,
            last_match_to_random:  0.9,
            last_match_to_first:   0.1,
            last_delete_to_random: 1.0,
        }
    }
}

impl ConsensusTemplate {
    /// The emission and transition tables for `consensus`. Symbols are stored
    /// in upper case.
    #[must_use]
    pub fn tables(&self, consensus: &[u8]) -> (MatchEmissions, TransitionProbabilities) {
        use StateLabel::*;

        let n = consensus.len();
        let emissions = consensus
            .iter()
            .enumerate()
            .map(|(i, &symbol)| (i + 1, symbol, 1.0))
            .collect();

        let mut transitions = TransitionProbabilities::new()
            .with(Random, Random, self.random_to_random)
            .with(Random, Match(1), self.random_to_match)
            .with(Random, Delete(1), self.random_to_delete);

        for p in 1..n {
            transitions.insert(Match(p), Insert(p), self.match_to_insert);
            transitions.insert(Match(p), Match(p + 1), self.match_to_match);
            transitions.insert(Match(p), Delete(p + 1), self.match_to_delete);
            transitions.insert(Insert(p), Insert(p), self.insert_to_insert);
            transitions.insert(Insert(p), Match(p + 1), self.insert_to_match);
            transitions.insert(Insert(p), Delete(p + 1), self.insert_to_delete);
            transitions.insert(Delete(p), Match(p + 1), self.delete_to_match);
            transitions.insert(Delete(p), Delete(p + 1), self.delete_to_delete);
        }

        if n > 0 {
            transitions.insert(Match(n), Random, self.last_match_to_random);
            transitions.insert(Match(n), Match(1), self.last_match_to_first);
            transitions.insert(Delete(n), Random, self.last_delete_to_random);
        }

        (emissions, transitions)
    }

    /// Builds a validated model for `consensus`.
    ///
    /// ## Errors
    ///
    /// Fails if the consensus is shorter than two symbols, or if a field is
    /// not a probability.
    pub fn build(&self, consensus: &[u8]) -> Result<ProfileModel, PhmmError> {
        let (emissions, transitions) = self.tables(consensus);
        ProfileModel::new(emissions, transitions)
    }

    /// Builds a model of `size` positions whose consensus is the alphabet
    /// `A, B, C, ...`, starting over after `Z`. This is a starting point for
    /// hand-edited models.
    ///
    /// ## Errors
    ///
    /// Fails if `size` is less than two, or if a field is not a probability.
    pub fn placeholder(&self, size: usize) -> Result<ProfileModel, PhmmError> {
        let consensus: Vec<u8> = (b'A'..=b'Z').cycle().take(size).collect();
        self.build(&consensus)
    }
}

impl ProfileModel {
    /// Builds a model for `consensus` with the default [`ConsensusTemplate`].
    ///
    /// ## Errors
    ///
    /// Fails if the consensus is shorter than two symbols.
    #[inline]
    pub fn from_consensus(consensus: &[u8]) -> Result<Self, PhmmError> {
        ConsensusTemplate::default().build(consensus)
    }
}
